//! `Data` <-> `string<application/json>`

use crate::converter::StringFormat;
use crate::error::Result;
use crate::formats;
use crate::tag::TypeTag;
use crate::value::Value;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Pretty JSON with a configurable indent. An indent of zero writes compact JSON.
#[derive(Debug, Clone)]
pub struct JsonFormat {
    indent: usize,
}

impl JsonFormat {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(2)
    }
}

impl StringFormat for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn target(&self) -> TypeTag {
        TypeTag::data()
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::JSON)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        let data = input.as_data()?;
        if self.indent == 0 {
            return Ok(serde_json::to_string(data)?);
        }
        let indent = " ".repeat(self.indent);
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        data.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::Data(serde_json::from_str(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_indent() {
        let text = JsonFormat::default()
            .stringify(&Value::from(json!({"a": 1})))
            .unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_custom_and_zero_indent() {
        let value = Value::from(json!({"a": [1]}));
        assert_eq!(
            JsonFormat::new(4).stringify(&value).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
        assert_eq!(JsonFormat::new(0).stringify(&value).unwrap(), "{\"a\":[1]}");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let value = JsonFormat::default().parse("{\"z\": 1, \"a\": 2}").unwrap();
        assert_eq!(
            JsonFormat::new(0).stringify(&value).unwrap(),
            "{\"z\":1,\"a\":2}"
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(JsonFormat::default().parse("{not json").is_err());
        assert!(JsonFormat::default().stringify(&Value::from("x")).is_err());
    }
}
