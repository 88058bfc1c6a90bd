use crate::domain::date::Date;
use crate::domain::datetime::DateTime;
use crate::domain::layout::TimeValue;
use crate::domain::nullable::{NullDate, NullDateTime};
use url::form_urlencoded::Serializer;

/// 以 key=value 加入 URL 查詢字串，value 依自身格式輸出
pub trait QueryEncode {
    fn encode_query(&self, key: &str, query: &mut Serializer<'_, String>);
}

impl QueryEncode for DateTime {
    fn encode_query(&self, key: &str, query: &mut Serializer<'_, String>) {
        query.append_pair(key, &self.format());
    }
}

impl QueryEncode for Date {
    fn encode_query(&self, key: &str, query: &mut Serializer<'_, String>) {
        query.append_pair(key, &self.format());
    }
}

// NULL 不輸出
impl QueryEncode for NullDateTime {
    fn encode_query(&self, key: &str, query: &mut Serializer<'_, String>) {
        if let Some(value) = self.get() {
            value.encode_query(key, query);
        }
    }
}

impl QueryEncode for NullDate {
    fn encode_query(&self, key: &str, query: &mut Serializer<'_, String>) {
        if let Some(value) = self.get() {
            value.encode_query(key, query);
        }
    }
}
