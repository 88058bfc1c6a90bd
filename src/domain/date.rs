use crate::domain::datetime::DateTime;
use crate::domain::layout::{
    parse_in_zone, resolve_layout, TimeValue, DATE_LAYOUT, DATE_TIME_LAYOUT,
};
use crate::domain::nullable::NullDate;
use crate::domain::zone::{localize, zone, Instant};
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 日期與輸出格式，時間點固定在設定時區的午夜
#[derive(Debug, Clone)]
pub struct Date {
    instant: Instant,
    layout: String,
}

fn midnight(instant: &Instant) -> Instant {
    localize(instant.date_naive().and_time(NaiveTime::MIN))
}

impl Date {
    pub(crate) fn from_instant(instant: Instant) -> Self {
        Self {
            instant: midnight(&instant),
            layout: DATE_LAYOUT.to_string(),
        }
    }

    /// 換上自訂格式；空白格式恢復預設，無效格式回傳錯誤
    pub fn with_layout(mut self, layout: &str) -> Result<Self> {
        self.layout = resolve_layout(layout, DATE_LAYOUT)?;
        Ok(self)
    }

    /// 轉為指定時分秒的 DateTime。自訂過的格式會一併帶過去。
    pub fn to_date_time_with_time(&self, hours: u32, minutes: u32, seconds: u32) -> DateTime {
        let layout = if self.layout == DATE_LAYOUT {
            DATE_TIME_LAYOUT.to_string()
        } else {
            self.layout.clone()
        };
        let date_time = DateTime::from_instant_with_layout(self.instant, layout);
        date_time.with_time(hours, minutes, seconds)
    }

    /// 從 self 到 end_date 經過的整天數，end_date 較早時為負數
    pub fn days_before(&self, end_date: &Date) -> i64 {
        (end_date.instant.date_naive() - self.instant.date_naive()).num_days()
    }

    pub fn nullable(self) -> NullDate {
        NullDate::new(self)
    }

    pub fn before(&self, other: &Date) -> bool {
        self.instant < other.instant
    }

    pub fn after(&self, other: &Date) -> bool {
        self.instant > other.instant
    }

    /// 是否落在開區間 (lower; upper)
    pub fn between(&self, lower: &Date, upper: &Date) -> bool {
        self.after(lower) && self.before(upper)
    }

    pub fn equal(&self, other: &Date) -> bool {
        self.instant == other.instant
    }

    /// 依自身格式從 JSON 字串讀入
    pub fn unmarshal_json(&mut self, data: &str) -> Result<()> {
        let s: String = serde_json::from_str(data)?;
        self.assign_str(&s)
    }
}

impl TimeValue for Date {
    const DEFAULT_LAYOUT: &'static str = DATE_LAYOUT;

    fn instant(&self) -> Instant {
        self.instant
    }

    fn layout(&self) -> &str {
        &self.layout
    }

    fn set_instant(&mut self, instant: Instant) {
        self.instant = midnight(&instant.with_timezone(&zone()));
    }
}

/// 任意時區的時間換算為設定時區當天的午夜
pub fn to_date<T: TimeZone>(instant: &chrono::DateTime<T>) -> Date {
    Date::from_instant(instant.with_timezone(&zone()))
}

/// 依 DATE_LAYOUT 解析
pub fn parse_date(s: &str) -> Result<Date> {
    parse_in_zone(DATE_LAYOUT, s).map(Date::from_instant)
}

pub fn today_date() -> Date {
    to_date(&Utc::now())
}

/// 「從未」的標記日期 0001-01-01，不可用於日期運算
pub fn never_date() -> Date {
    let naive = NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN);
    Date::from_instant(localize(naive))
}

impl Default for Date {
    fn default() -> Self {
        never_date()
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Date {}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.timestamp().hash(state);
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_date(&s).map_err(de::Error::custom)
    }
}
