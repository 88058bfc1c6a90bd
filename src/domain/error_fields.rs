use crate::utils::error::{Result, TypesError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 欄位名稱對應錯誤訊息列表，用於收集驗證結果。
/// 訊息列表為空的欄位代表已檢查但沒有錯誤。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorFieldsMap(IndexMap<String, Vec<String>>);

impl ErrorFieldsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在欄位的訊息列表後追加一筆，欄位不存在時建立
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// 標記欄位已檢查；已存在的訊息保持不變
    pub fn add_field(&mut self, field: impl Into<String>) {
        self.0.entry(field.into()).or_default();
    }

    /// 合併另一份結果。訊息逐筆追加，不去重；空列表只在欄位不存在時建立。
    pub fn add_errors(&mut self, other: &ErrorFieldsMap) {
        for (field, messages) in other.iter() {
            if messages.is_empty() {
                self.add_field(field.as_str());
                continue;
            }
            for message in messages {
                self.add_error(field.as_str(), message.as_str());
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        self.0.values().any(|messages| !messages.is_empty())
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 有錯誤時轉為 ValidationError
    pub fn into_result(self) -> Result<()> {
        if self.has_errors() {
            return Err(TypesError::ValidationError(self));
        }
        Ok(())
    }
}

impl FromIterator<(String, Vec<String>)> for ErrorFieldsMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 每行一筆「欄位: 訊息」，全部行一起排序
impl fmt::Display for ErrorFieldsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .0
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |message| format!("{}: {}", field, message))
            })
            .collect();
        lines.sort();
        f.write_str(lines.join("\n").trim_end())
    }
}
