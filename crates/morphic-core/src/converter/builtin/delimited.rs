//! Lists of strings written one per line or separated by a delimiter
//!
//! Parsing splits on the separator, trims each item and drops empty items,
//! yielding a `Data` array of strings. Writing joins the items' text with
//! the separator.

use crate::converter::StringFormat;
use crate::error::{Error, Result};
use crate::formats;
use crate::tag::TypeTag;
use crate::value::Value;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone)]
pub struct DelimitedFormat {
    name: &'static str,
    format: &'static str,
    separator: char,
    joiner: &'static str,
}

impl DelimitedFormat {
    pub fn newline() -> Self {
        Self {
            name: "newline-separated",
            format: formats::NEWLINE_SEPARATED,
            separator: '\n',
            joiner: "\n",
        }
    }

    pub fn comma() -> Self {
        Self {
            name: "comma-separated",
            format: formats::COMMA_SEPARATED,
            separator: ',',
            joiner: ",",
        }
    }

    pub fn semicolon() -> Self {
        Self {
            name: "semicolon-separated",
            format: formats::SEMICOLON_SEPARATED,
            separator: ';',
            joiner: ";",
        }
    }
}

fn item_text(item: &JsonValue) -> String {
    match item {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl StringFormat for DelimitedFormat {
    fn name(&self) -> &str {
        self.name
    }

    fn target(&self) -> TypeTag {
        TypeTag::data()
    }

    fn string_format(&self) -> Option<&str> {
        Some(self.format)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        let items = input
            .as_data()?
            .as_array()
            .ok_or_else(|| Error::type_mismatch("array of items", "non-array data"))?;
        Ok(items
            .iter()
            .map(item_text)
            .collect::<Vec<_>>()
            .join(self.joiner))
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let items = text
            .split(self.separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| JsonValue::String(item.to_string()))
            .collect();
        Ok(Value::Data(JsonValue::Array(items)))
    }
}
