use crate::domain::date::{self, Date};
use crate::domain::layout::{parse_in_zone, resolve_layout, TimeValue, DATE_LAYOUT, DATE_TIME_LAYOUT};
use crate::domain::nullable::NullDateTime;
use crate::domain::zone::{localize, zone, Instant};
use crate::utils::error::Result;
use chrono::{Duration, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 日期時間與輸出格式。比較只看時間點，不看格式。
#[derive(Debug, Clone)]
pub struct DateTime {
    instant: Instant,
    layout: String,
}

impl DateTime {
    pub(crate) fn from_instant(instant: Instant) -> Self {
        Self::from_instant_with_layout(instant, DATE_TIME_LAYOUT.to_string())
    }

    /// layout 必須是已檢查過的格式
    pub(crate) fn from_instant_with_layout(instant: Instant, layout: String) -> Self {
        Self { instant, layout }
    }

    /// 換上自訂格式；空白格式恢復預設，無效格式回傳錯誤
    pub fn with_layout(mut self, layout: &str) -> Result<Self> {
        self.layout = resolve_layout(layout, DATE_TIME_LAYOUT)?;
        Ok(self)
    }

    /// 保留日期，改寫時分秒。超出範圍的值會進位到後面的日期。
    pub fn with_time(&self, hours: u32, minutes: u32, seconds: u32) -> Self {
        let midnight = self.instant.date_naive().and_time(NaiveTime::MIN);
        let naive = midnight
            + Duration::hours(i64::from(hours))
            + Duration::minutes(i64::from(minutes))
            + Duration::seconds(i64::from(seconds));
        Self {
            instant: localize(naive),
            layout: self.layout.clone(),
        }
    }

    pub fn to_date(&self) -> Date {
        date::to_date(&self.instant)
    }

    pub fn nullable(self) -> NullDateTime {
        NullDateTime::new(self)
    }

    pub fn before(&self, other: &DateTime) -> bool {
        self.instant < other.instant
    }

    pub fn after(&self, other: &DateTime) -> bool {
        self.instant > other.instant
    }

    /// 是否落在開區間 (lower; upper)
    pub fn between(&self, lower: &DateTime, upper: &DateTime) -> bool {
        self.after(lower) && self.before(upper)
    }

    pub fn equal(&self, other: &DateTime) -> bool {
        self.instant == other.instant
    }

    /// 依自身格式從 JSON 字串讀入
    pub fn unmarshal_json(&mut self, data: &str) -> Result<()> {
        let s: String = serde_json::from_str(data)?;
        self.assign_str(&s)
    }
}

impl TimeValue for DateTime {
    const DEFAULT_LAYOUT: &'static str = DATE_TIME_LAYOUT;

    fn instant(&self) -> Instant {
        self.instant
    }

    fn layout(&self) -> &str {
        &self.layout
    }

    fn set_instant(&mut self, instant: Instant) {
        self.instant = instant.with_timezone(&zone());
    }
}

/// 任意時區的時間換算為設定時區，去掉秒以下的部分
pub fn to_date_time<T: TimeZone>(instant: &chrono::DateTime<T>) -> DateTime {
    DateTime::from_instant(instant.with_timezone(&zone()).trunc_subsecs(0))
}

/// 依 DATE_TIME_LAYOUT 解析
pub fn parse_date_time(s: &str) -> Result<DateTime> {
    parse_in_zone(DATE_TIME_LAYOUT, s).map(DateTime::from_instant)
}

/// 依 DATE_LAYOUT 解析日期，再設定時分秒
pub fn parse_date_with_time(s: &str, hours: u32, minutes: u32, seconds: u32) -> Result<DateTime> {
    let instant = parse_in_zone(DATE_LAYOUT, s)?;
    Ok(DateTime::from_instant(instant).with_time(hours, minutes, seconds))
}

pub fn date_time_now() -> DateTime {
    to_date_time(&Utc::now())
}

/// 今天的指定時分秒
pub fn today_with_time(hours: u32, minutes: u32, seconds: u32) -> DateTime {
    date_time_now().with_time(hours, minutes, seconds)
}

/// 「從未」的標記值 0001-01-01 00:00:00，不可用於日期運算
pub fn never_time() -> DateTime {
    let naive = NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN);
    DateTime::from_instant(localize(naive))
}

impl Default for DateTime {
    fn default() -> Self {
        never_time()
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for DateTime {}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.timestamp().hash(state);
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_date_time(&s).map_err(de::Error::custom)
    }
}
