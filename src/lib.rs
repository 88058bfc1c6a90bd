pub mod adapters;
pub mod config;
pub mod domain;
pub mod utils;

pub use adapters::{query::QueryEncode, sql::{Scanner, SqlValue, Valuer}, xml::XmlElement};
pub use config::TypesConfig;
pub use domain::date::{never_date, parse_date, to_date, today_date, Date};
pub use domain::datetime::{
    date_time_now, never_time, parse_date_time, parse_date_with_time, to_date_time,
    today_with_time, DateTime,
};
pub use domain::decimals::{compare_precision, set_compare_precision, Decimals};
pub use domain::error_fields::ErrorFieldsMap;
pub use domain::layout::{
    TimeValue, DATE_LAYOUT, DATE_TIME_LAYOUT, GRAPHS_DATE_LAYOUT, GRAPHS_DATE_SHORT_LAYOUT,
};
pub use domain::nullable::{NullDate, NullDateTime};
pub use utils::error::{Result, TypesError};
pub use utils::validation::{validate_required_field, Validate};
