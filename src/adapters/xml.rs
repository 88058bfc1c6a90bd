use crate::domain::date::Date;
use crate::domain::datetime::DateTime;
use crate::domain::layout::TimeValue;
use crate::domain::nullable::{NullDate, NullDateTime};
use crate::utils::error::{Result, TypesError};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

/// 以單一元素的文字內容表示的值
pub trait XmlElement {
    /// None 代表輸出空元素
    fn xml_text(&self) -> Option<String>;

    fn assign_xml_text(&mut self, text: &str) -> Result<()>;

    fn to_xml(&self, tag: &str) -> Result<String> {
        write_element(tag, self.xml_text().as_deref())
    }

    /// 讀取根元素的文字內容並寫入自身
    fn unmarshal_xml(&mut self, xml: &str) -> Result<()> {
        let text = read_element_text(xml)?;
        self.assign_xml_text(&text)
    }
}

fn write_element(tag: &str, text: Option<&str>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let element = writer.create_element(tag);
    match text {
        Some(text) => element
            .write_text_content(BytesText::new(text))
            .map_err(TypesError::xml)?,
        None => element.write_empty().map_err(TypesError::xml)?,
    };
    String::from_utf8(writer.into_inner()).map_err(TypesError::xml)
}

fn read_element_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(TypesError::xml)? {
            Event::Start(_) => depth += 1,
            Event::Empty(_) if depth == 0 => return Ok(text),
            Event::Text(content) if depth == 1 => {
                text.push_str(&content.unescape().map_err(TypesError::xml)?);
            }
            Event::CData(content) if depth == 1 => {
                text.push_str(&content.decode().map_err(TypesError::xml)?);
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(text);
                }
            }
            Event::Eof => return Err(TypesError::xml("unexpected end of document")),
            _ => {}
        }
    }
}

impl XmlElement for DateTime {
    fn xml_text(&self) -> Option<String> {
        Some(self.format())
    }

    fn assign_xml_text(&mut self, text: &str) -> Result<()> {
        self.assign_str(text)
    }
}

impl XmlElement for Date {
    fn xml_text(&self) -> Option<String> {
        Some(self.format())
    }

    fn assign_xml_text(&mut self, text: &str) -> Result<()> {
        self.assign_str(text)
    }
}

impl XmlElement for NullDateTime {
    fn xml_text(&self) -> Option<String> {
        self.get().map(TimeValue::format)
    }

    /// 空內容代表 NULL
    fn assign_xml_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.clear();
            return Ok(());
        }
        self.assign_text(text)
    }
}

impl XmlElement for NullDate {
    fn xml_text(&self) -> Option<String> {
        self.get().map(TimeValue::format)
    }

    /// 空內容代表 NULL
    fn assign_xml_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.clear();
            return Ok(());
        }
        self.assign_text(text)
    }
}
