use crate::domain::error_fields::ErrorFieldsMap;
use crate::domain::zone::parse_timezone;

/// 驗證結果以 ErrorFieldsMap 回傳，不在第一個錯誤就中止
pub trait Validate {
    fn validate(&self) -> ErrorFieldsMap;
}

/// 必填欄位；缺值時記錄錯誤並回傳 None
pub fn validate_required_field<'a, T>(
    errors: &mut ErrorFieldsMap,
    field_name: &str,
    value: Option<&'a T>,
) -> Option<&'a T> {
    errors.add_field(field_name);
    if value.is_none() {
        errors.add_error(field_name, "Field is required");
    }
    value
}

pub fn validate_non_empty_string(errors: &mut ErrorFieldsMap, field_name: &str, value: &str) {
    errors.add_field(field_name);
    if value.trim().is_empty() {
        errors.add_error(field_name, "Value cannot be empty or whitespace-only");
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    errors: &mut ErrorFieldsMap,
    field_name: &str,
    value: &T,
    min: &T,
    max: &T,
) {
    errors.add_field(field_name);
    if value < min || value > max {
        errors.add_error(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        );
    }
}

pub fn validate_timezone(errors: &mut ErrorFieldsMap, field_name: &str, name: &str) {
    errors.add_field(field_name);
    if let Err(e) = parse_timezone(name) {
        errors.add_error(field_name, e.to_string());
    }
}
