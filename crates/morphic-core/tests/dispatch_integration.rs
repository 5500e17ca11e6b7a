//! Registration order and first-match-wins dispatch

mod test_support;

use morphic_core::converter::builtin::{JsonFormat, YamlFormat};
use morphic_core::{Converter, Error, FormattedText, Registry, StringConverter, Value};
use serde_json::json;
use std::sync::Arc;
use test_support::{conv, Named};

#[test]
fn test_earlier_registration_shadows_later() {
    let first = Named::new("first", "Data:string<application/json>");
    let second = Named::new("second", "Data:string<application/json>");
    let registry = Registry::builder()
        .register_arc(first.clone())
        .register_arc(second.clone())
        .build();

    let out = registry
        .convert(&Value::from(json!(1)), &conv("Data:string<application/json>"))
        .unwrap();
    assert_eq!(out, Value::from("first"));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0);
}

#[test]
fn test_custom_converter_ahead_of_builtin() {
    let custom = Named::new("custom-json", "Data:string<application/json>");
    let registry = Registry::builder()
        .register_arc(custom.clone())
        .register(StringConverter::new(JsonFormat::default()))
        .register(StringConverter::new(YamlFormat))
        .build();

    assert_eq!(registry.converter_names(), vec!["custom-json", "json", "yaml"]);
    let out = registry
        .convert(&Value::from(json!({})), &conv("Data:string<application/json>"))
        .unwrap();
    assert_eq!(out, Value::from("custom-json"));

    // Parsing is still served by the built-in converter
    let out = registry
        .convert(&Value::from("{}"), &conv("string<application/json>:Data"))
        .unwrap();
    assert_eq!(out, Value::from(json!({})));
}

#[test]
fn test_custom_converters_get_container_layers() {
    let custom = Named::new("shout", "string<text/plain>:string<text/x-shout>");
    let registry = Registry::builder().register_arc(custom.clone()).build();
    let input = Value::from(FormattedText::wrap("hi", Some("text/plain"), None));

    let out = registry
        .convert(&input, &conv("Text<text/plain>:Text<text/x-shout>"))
        .unwrap();
    let Value::Text(text) = out else {
        panic!("expected a Text container");
    };
    assert_eq!(text.content(), "shout");
    assert_eq!(text.format(), Some("text/x-shout"));
    assert_eq!(custom.calls(), 1);
}

#[test]
fn test_unmatched_request() {
    let registry = Registry::builder()
        .register_arc(Named::new("only", "Data:string"))
        .build();
    let err = registry
        .convert(&Value::from("x"), &conv("string:Data"))
        .unwrap_err();
    assert!(matches!(err, Error::NoConverterFound { .. }));
    assert!(!err.is_contract_violation());
}

#[test]
fn test_string_converter_rejects_foreign_conversion() {
    let converter: Arc<dyn Converter> = Arc::new(StringConverter::new(YamlFormat));
    let err = converter
        .convert(&Value::from("a: 1"), &conv("string<application/json>:Data"))
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedConversion { .. }));
    assert!(err.is_contract_violation());
}
