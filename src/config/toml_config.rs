use crate::domain::decimals::set_compare_precision;
use crate::domain::error_fields::ErrorFieldsMap;
use crate::domain::zone::{install_timezone, DEFAULT_TIMEZONE};
use crate::utils::error::{Result, TypesError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_timezone, Validate,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypesConfig {
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub decimal: DecimalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecimalConfig {
    pub compare_precision: Option<Decimal>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl TypesConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TypesError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TZ_NAME})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TypesError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證後套用：設定時區與比較容差
    pub fn apply(&self) -> Result<()> {
        self.validate().into_result()?;

        install_timezone(&self.time.timezone)?;
        if let Some(precision) = self.decimal.compare_precision {
            set_compare_precision(precision);
        }
        tracing::info!(
            "Value types configured: timezone={}, compare_precision={:?}",
            self.time.timezone,
            self.decimal.compare_precision
        );
        Ok(())
    }
}

impl Validate for TypesConfig {
    fn validate(&self) -> ErrorFieldsMap {
        let mut errors = ErrorFieldsMap::new();

        validate_non_empty_string(&mut errors, "time.timezone", &self.time.timezone);
        if !self.time.timezone.trim().is_empty() {
            validate_timezone(&mut errors, "time.timezone", &self.time.timezone);
        }

        if let Some(precision) = &self.decimal.compare_precision {
            validate_range(
                &mut errors,
                "decimal.compare_precision",
                precision,
                &Decimal::ZERO,
                &Decimal::ONE,
            );
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TypesConfig::from_toml_str("").unwrap();
        assert_eq!(config.time.timezone, DEFAULT_TIMEZONE);
        assert!(config.decimal.compare_precision.is_none());
        assert!(!config.validate().has_errors());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("VALUE_TYPES_TEST_TZ", "Asia/Taipei");
        let config = TypesConfig::from_toml_str(
            r#"
[time]
timezone = "${VALUE_TYPES_TEST_TZ}"
"#,
        )
        .unwrap();
        assert_eq!(config.time.timezone, "Asia/Taipei");

        let config = TypesConfig::from_toml_str(
            r#"
[time]
timezone = "${VALUE_TYPES_UNDEFINED_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.time.timezone, "${VALUE_TYPES_UNDEFINED_VAR}");
        assert!(config.validate().has_errors());
    }

    #[test]
    fn test_validate_reports_every_field() {
        let config = TypesConfig::from_toml_str(
            r#"
[time]
timezone = "Nowhere/City"

[decimal]
compare_precision = "2.5"
"#,
        )
        .unwrap();

        let errors = config.validate();
        assert_eq!(errors.get("time.timezone").map(<[String]>::len), Some(1));
        assert_eq!(
            errors.get("decimal.compare_precision").map(<[String]>::len),
            Some(1)
        );
        assert!(matches!(
            config.apply(),
            Err(TypesError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TypesConfig::from_toml_str("[time"),
            Err(TypesError::ConfigError { .. })
        ));
    }
}
