use crate::domain::date::Date;
use crate::domain::datetime::DateTime;
use crate::domain::layout::{format_instant, TimeValue};
use crate::domain::nullable::{NullDate, NullDateTime};
use crate::domain::zone::zone;
use crate::utils::error::{Result, TypesError};
use chrono::Utc;

/// 資料庫驅動程式交換的值
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(chrono::DateTime<Utc>),
}

impl SqlValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::Int(_) => "int",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }
}

impl From<chrono::DateTime<Utc>> for SqlValue {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

/// 寫入資料庫時的轉換
pub trait Valuer {
    fn value(&self) -> SqlValue;
}

/// 從資料庫讀出時的轉換，寫入既有的值
pub trait Scanner {
    fn scan(&mut self, src: SqlValue) -> Result<()>;
}

/// 一律使用型別的預設格式，與顯示用的 layout 無關
fn canonical_text<T: TimeValue>(value: &T) -> SqlValue {
    let instant = value.instant().with_timezone(&zone());
    SqlValue::Text(format_instant(&instant, T::DEFAULT_LAYOUT))
}

/// 只接受時間戳記或 NULL；NULL 不改變原值。回傳是否讀到時間戳記。
fn scan_timestamp<T: TimeValue>(target: &mut T, src: SqlValue) -> Result<bool> {
    match src {
        SqlValue::Null => Ok(false),
        SqlValue::Timestamp(timestamp) => {
            target.set_instant(timestamp.with_timezone(&zone()));
            Ok(true)
        }
        other => Err(TypesError::TypeConversionError {
            expected: "timestamp",
            found: other.kind(),
        }),
    }
}

impl Valuer for DateTime {
    fn value(&self) -> SqlValue {
        canonical_text(self)
    }
}

impl Valuer for Date {
    fn value(&self) -> SqlValue {
        canonical_text(self)
    }
}

impl Valuer for NullDateTime {
    fn value(&self) -> SqlValue {
        self.get().map(Valuer::value).unwrap_or(SqlValue::Null)
    }
}

impl Valuer for NullDate {
    fn value(&self) -> SqlValue {
        self.get().map(Valuer::value).unwrap_or(SqlValue::Null)
    }
}

impl Scanner for DateTime {
    fn scan(&mut self, src: SqlValue) -> Result<()> {
        scan_timestamp(self, src).map(|_| ())
    }
}

impl Scanner for Date {
    fn scan(&mut self, src: SqlValue) -> Result<()> {
        scan_timestamp(self, src).map(|_| ())
    }
}

impl Scanner for NullDateTime {
    fn scan(&mut self, src: SqlValue) -> Result<()> {
        if src == SqlValue::Null {
            self.clear();
            return Ok(());
        }
        self.valid = scan_timestamp(&mut self.value, src)?;
        Ok(())
    }
}

impl Scanner for NullDate {
    fn scan(&mut self, src: SqlValue) -> Result<()> {
        if src == SqlValue::Null {
            self.clear();
            return Ok(());
        }
        self.valid = scan_timestamp(&mut self.value, src)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date::parse_date;
    use crate::domain::datetime::parse_date_time;
    use crate::domain::layout::GRAPHS_DATE_LAYOUT;
    use chrono::TimeZone;

    #[test]
    fn test_value_ignores_display_layout() {
        let dt = parse_date_time("2015-07-30 05:06:07")
            .unwrap()
            .with_layout(GRAPHS_DATE_LAYOUT)
            .unwrap();
        assert_eq!(dt.value(), SqlValue::Text("2015-07-30 05:06:07".to_string()));

        let date = parse_date("2015-07-30").unwrap().with_layout("%d/%m").unwrap();
        assert_eq!(date.value(), SqlValue::Text("2015-07-30".to_string()));
    }

    #[test]
    fn test_null_value() {
        assert_eq!(NullDateTime::null().value(), SqlValue::Null);
        assert_eq!(NullDate::null().value(), SqlValue::Null);
        let date = parse_date("2015-07-30").unwrap().nullable();
        assert_eq!(date.value(), SqlValue::Text("2015-07-30".to_string()));
    }

    #[test]
    fn test_scan_timestamp_converts_to_zone() {
        // 05:06:07 MSK
        let timestamp = Utc.with_ymd_and_hms(2015, 7, 30, 2, 6, 7).unwrap();

        let mut dt = DateTime::default();
        dt.scan(SqlValue::from(timestamp)).unwrap();
        assert_eq!(dt.to_string(), "2015-07-30 05:06:07");

        let mut date = Date::default();
        date.scan(SqlValue::from(timestamp)).unwrap();
        assert_eq!(date, parse_date("2015-07-30").unwrap());
    }

    #[test]
    fn test_scan_rejects_other_types() {
        let mut dt = DateTime::default();
        let err = dt
            .scan(SqlValue::Text("2015-07-30 05:06:07".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            TypesError::TypeConversionError {
                expected: "timestamp",
                found: "text"
            }
        ));
        assert!(Date::default().scan(SqlValue::Int(1)).is_err());
    }

    #[test]
    fn test_scan_null() {
        let mut dt = parse_date_time("2015-07-30 05:06:07").unwrap();
        dt.scan(SqlValue::Null).unwrap();
        assert_eq!(dt.to_string(), "2015-07-30 05:06:07");

        let mut nullable = dt.nullable();
        nullable.scan(SqlValue::Null).unwrap();
        assert!(!nullable.valid);

        let timestamp = Utc.with_ymd_and_hms(2015, 7, 30, 2, 6, 7).unwrap();
        let mut nullable = NullDate::null();
        nullable.scan(SqlValue::from(timestamp)).unwrap();
        assert!(nullable.valid);
        assert_eq!(nullable.to_string(), "2015-07-30");
    }
}
