//! `Data` <-> `string<text/x-yaml>`

use crate::converter::StringFormat;
use crate::error::Result;
use crate::formats;
use crate::tag::TypeTag;
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl StringFormat for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn target(&self) -> TypeTag {
        TypeTag::data()
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::YAML)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(serde_yaml::to_string(input.as_data()?)?)
    }

    fn parse(&self, text: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Data(serde_json::Value::Null));
        }
        Ok(Value::Data(serde_yaml::from_str::<serde_json::Value>(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_sequence_of_maps() {
        let value = YamlFormat.parse("- a: 1").unwrap();
        assert_eq!(value, Value::from(json!([{"a": 1}])));
    }

    #[test]
    fn test_stringify() {
        let text = YamlFormat
            .stringify(&Value::from(json!({"name": "x", "tags": ["a", "b"]})))
            .unwrap();
        assert_eq!(text, "name: x\ntags:\n- a\n- b\n");
    }

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(YamlFormat.parse("").unwrap(), Value::from(json!(null)));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(YamlFormat.parse("a: [1, 2").is_err());
    }
}
