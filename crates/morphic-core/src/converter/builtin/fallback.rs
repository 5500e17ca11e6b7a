//! Generic `* -> string` converter
//!
//! Registered after every format-specific converter so that it only claims
//! what nothing else did. It renders any value with [`Value::to_text`] and
//! has no reverse direction.

use crate::conversion::Conversion;
use crate::converter::Converter;
use crate::error::{Error, Result};
use crate::formats;
use crate::tag::kinds;
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct ToStringConverter;

impl ToStringConverter {
    fn accepts_target(conversion: &Conversion) -> bool {
        let target = conversion.target();
        target.is_kind(kinds::STRING) && matches!(target.format(), None | Some(formats::PLAIN))
    }
}

impl Converter for ToStringConverter {
    fn name(&self) -> &str {
        "to-string"
    }

    fn supports(&self, input: &Value, conversion: &Conversion) -> bool {
        Self::accepts_target(conversion) && conversion.source().is_kind(input.kind())
    }

    fn convert(&self, input: &Value, conversion: &Conversion) -> Result<Value> {
        if !self.supports(input, conversion) {
            return Err(Error::UnexpectedConversion {
                converter: self.name().to_string(),
                conversion: conversion.clone(),
            });
        }
        Ok(Value::String(input.to_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conv(text: &str) -> Conversion {
        text.parse().unwrap()
    }

    #[test]
    fn test_renders_any_value() {
        let out = ToStringConverter
            .convert(&Value::from(json!({"a": [1, 2]})), &conv("Data:string"))
            .unwrap();
        assert_eq!(out, Value::from("{\"a\":[1,2]}"));

        let url = Value::Url(url::Url::parse("https://example.com/x").unwrap());
        let out = ToStringConverter.convert(&url, &conv("Url:string<text/plain>")).unwrap();
        assert_eq!(out, Value::from("https://example.com/x"));
    }

    #[test]
    fn test_only_plain_string_targets() {
        let input = Value::from(json!(1));
        assert!(ToStringConverter.supports(&input, &conv("Data:string")));
        assert!(!ToStringConverter.supports(&input, &conv("Data:string<application/json>")));
        assert!(!ToStringConverter.supports(&input, &conv("string:Data")));
    }

    #[test]
    fn test_source_kind_must_match_input() {
        let input = Value::from(json!(1));
        assert!(!ToStringConverter.supports(&input, &conv("Html:string")));
        let err = ToStringConverter
            .convert(&input, &conv("Html:string"))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }
}
