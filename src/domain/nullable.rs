use crate::domain::date::{parse_date, Date};
use crate::domain::datetime::{parse_date_time, DateTime};
use crate::domain::layout::TimeValue;
use crate::utils::error::Result;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 可為 NULL 的 DateTime；valid 為 false 時 value 沒有意義
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullDateTime {
    pub value: DateTime,
    pub valid: bool,
}

/// 可為 NULL 的 Date；valid 為 false 時 value 沒有意義
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullDate {
    pub value: Date,
    pub valid: bool,
}

impl NullDateTime {
    pub fn new(value: DateTime) -> Self {
        Self { value, valid: true }
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&DateTime> {
        self.valid.then_some(&self.value)
    }

    /// 讀入 JSON；null 會把時間點歸零並設為無效，其餘依 value 的格式解析
    pub fn unmarshal_json(&mut self, data: &str) -> Result<()> {
        match serde_json::from_str::<Option<String>>(data)? {
            None => self.clear(),
            Some(s) => self.assign_text(&s)?,
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.value.set_instant(DateTime::default().instant());
        self.valid = false;
    }

    pub(crate) fn assign_text(&mut self, s: &str) -> Result<()> {
        let result = self.value.assign_str(s);
        self.valid = result.is_ok();
        result
    }
}

impl NullDate {
    pub fn new(value: Date) -> Self {
        Self { value, valid: true }
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Date> {
        self.valid.then_some(&self.value)
    }

    /// 讀入 JSON；null 會把時間點歸零並設為無效，其餘依 value 的格式解析
    pub fn unmarshal_json(&mut self, data: &str) -> Result<()> {
        match serde_json::from_str::<Option<String>>(data)? {
            None => self.clear(),
            Some(s) => self.assign_text(&s)?,
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.value.set_instant(Date::default().instant());
        self.valid = false;
    }

    pub(crate) fn assign_text(&mut self, s: &str) -> Result<()> {
        let result = self.value.assign_str(s);
        self.valid = result.is_ok();
        result
    }
}

impl From<Option<DateTime>> for NullDateTime {
    fn from(value: Option<DateTime>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl From<Option<Date>> for NullDate {
    fn from(value: Option<Date>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl fmt::Display for NullDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for NullDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for NullDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.get() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl Serialize for NullDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.get() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::null()),
            Some(s) => parse_date_time(&s).map(Self::new).map_err(de::Error::custom),
        }
    }
}

impl<'de> Deserialize<'de> for NullDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::null()),
            Some(s) => parse_date(&s).map(Self::new).map_err(de::Error::custom),
        }
    }
}
