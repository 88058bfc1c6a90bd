use crate::domain::zone::{localize, Instant};
use crate::utils::error::{Result, TypesError};
use chrono::format::{self, Fixed, Item, Numeric, Parsed, StrftimeItems};
use chrono::NaiveTime;
use std::fmt::Write;

// chrono strftime 格式
pub const DATE_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_LAYOUT: &str = "%Y-%m-%d";
pub const GRAPHS_DATE_LAYOUT: &str = "%d.%m.%Y";
/// 僅供輸出，沒有年份無法解析
pub const GRAPHS_DATE_SHORT_LAYOUT: &str = "%d.%m";

/// 帶有輸出格式的時間值，JSON、XML、SQL 與查詢字串都經由這裡轉換
pub trait TimeValue {
    /// 未指定格式時使用的格式，同時也是資料庫的傳輸格式
    const DEFAULT_LAYOUT: &'static str;

    fn instant(&self) -> Instant;

    fn layout(&self) -> &str;

    /// 寫入時間點，實作負責正規化（例如日期截到午夜）
    fn set_instant(&mut self, instant: Instant);

    /// 依自身格式輸出
    fn format(&self) -> String {
        format_instant(&self.instant(), self.layout())
    }

    /// 依自身格式解析並寫入；失敗時保持原值
    fn assign_str(&mut self, s: &str) -> Result<()> {
        let instant = parse_in_zone(self.layout(), s)?;
        self.set_instant(instant);
        Ok(())
    }
}

/// 檢查格式字串；空白字串代表使用預設格式
pub(crate) fn resolve_layout(layout: &str, default: &'static str) -> Result<String> {
    if layout.trim().is_empty() {
        return Ok(default.to_string());
    }
    check_layout(layout)?;
    Ok(layout.to_string())
}

/// 格式只描述設定時區的牆上時間，不接受時區、偏移量與 Unix 時間戳
pub fn check_layout(layout: &str) -> Result<()> {
    if StrftimeItems::new(layout).any(|item| !is_wall_clock_item(&item)) {
        return Err(TypesError::InvalidLayoutError {
            layout: layout.to_string(),
        });
    }
    Ok(())
}

fn is_wall_clock_item(item: &Item<'_>) -> bool {
    !matches!(
        item,
        Item::Error
            | Item::Numeric(Numeric::Timestamp, _)
            | Item::Fixed(
                Fixed::TimezoneName
                    | Fixed::TimezoneOffset
                    | Fixed::TimezoneOffsetZ
                    | Fixed::TimezoneOffsetColon
                    | Fixed::TimezoneOffsetColonZ
                    | Fixed::TimezoneOffsetDoubleColon
                    | Fixed::TimezoneOffsetTripleColon
                    | Fixed::Internal(_)
                    | Fixed::RFC2822
                    | Fixed::RFC3339
            )
    )
}

pub(crate) fn format_instant(instant: &Instant, layout: &str) -> String {
    instant.format(layout).to_string()
}

/// 依格式解析字串。日期欄位必填；完全沒有時間欄位時為午夜，
/// 有任何時間欄位就必須能組成完整時間。
/// 輸入必須與格式逐字相符（補零、寬度、空白），解析結果重新輸出後要與輸入相同。
pub(crate) fn parse_in_zone(layout: &str, s: &str) -> Result<Instant> {
    let parse_error = |reason: String| TypesError::ParseError {
        input: s.to_string(),
        layout: layout.to_string(),
        reason,
    };

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, s, StrftimeItems::new(layout))
        .map_err(|e| parse_error(e.to_string()))?;
    let date = parsed
        .to_naive_date()
        .map_err(|e| parse_error(e.to_string()))?;
    let time = if has_time_fields(&parsed) {
        parsed
            .to_naive_time()
            .map_err(|e| parse_error(e.to_string()))?
    } else {
        NaiveTime::MIN
    };
    let naive = date.and_time(time);

    let mut canonical = String::new();
    write!(canonical, "{}", naive.format(layout))
        .map_err(|_| parse_error("layout cannot be formatted".to_string()))?;
    if canonical != s {
        return Err(parse_error(format!("input does not match layout, expected '{}'", canonical)));
    }

    Ok(localize(naive))
}

fn has_time_fields(parsed: &Parsed) -> bool {
    parsed.hour_div_12().is_some()
        || parsed.hour_mod_12().is_some()
        || parsed.minute().is_some()
        || parsed.second().is_some()
        || parsed.nanosecond().is_some()
}
