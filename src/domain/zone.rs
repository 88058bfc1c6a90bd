use crate::utils::error::{Result, TypesError};
use chrono::{Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;

/// 預設時區
pub const DEFAULT_TIMEZONE: &str = "Europe/Moscow";

/// 已換算到設定時區的時間點
pub type Instant = chrono::DateTime<Tz>;

static ZONE: OnceCell<Tz> = OnceCell::new();

/// 取得目前的時區，尚未設定時使用 DEFAULT_TIMEZONE
pub fn zone() -> Tz {
    *ZONE.get_or_init(|| resolve_or_utc(DEFAULT_TIMEZONE))
}

/// 解析時區名稱，失敗時回傳錯誤
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TypesError::UnknownTimezoneError {
            name: name.to_string(),
        })
}

/// 設定行程內唯一的時區。
/// 時區只能設定一次；已使用其他時區後再切換會回傳錯誤。
pub fn install_timezone(name: &str) -> Result<Tz> {
    let requested = parse_timezone(name)?;
    let current = *ZONE.get_or_init(|| {
        tracing::info!("Time zone set to {}", requested.name());
        requested
    });

    if current != requested {
        return Err(TypesError::AlreadyInitializedError {
            current: current.name().to_string(),
            requested: requested.name().to_string(),
        });
    }
    Ok(current)
}

pub(crate) fn resolve_or_utc(name: &str) -> Tz {
    match parse_timezone(name) {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!("{}, falling back to UTC", e);
            Tz::UTC
        }
    }
}

/// 將牆上時間解讀為設定時區的時間點。
/// 重疊時段取較早者；夏令時間跳過的時段沿用跳躍前的偏移量，結果向後推移。
pub(crate) fn localize(naive: NaiveDateTime) -> Instant {
    let tz = zone();
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(naive - Duration::days(1))).fix();
            let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}
