//! End-to-end conversions through the default registry

mod test_support;

use morphic_core::{registry, Error, TypeTag, Value};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_support::{conv, convert};

#[test]
fn test_yaml_string_to_data() {
    let value = convert("- a: 1", "string<text/x-yaml>:Data");
    assert_eq!(value, Value::from(json!([{"a": 1}])));
}

#[test]
fn test_data_to_json_string() {
    let value = convert(json!({"a": 1}), "Data:string<application/json>");
    assert_eq!(value, Value::from("{\n  \"a\": 1\n}"));
}

#[test]
fn test_xml_string_to_document() {
    let value = convert("<product>Hello</product>", "string<text/xml>:Xml");
    let xml = value.as_xml().unwrap();
    assert_eq!(xml.root_name(), "product");
    assert_eq!(xml.root().text(), "Hello");
}

#[test]
fn test_csv_to_yaml_via_data() {
    let data = convert("name,qty\napple,3\n", "string<text/csv>:Data");
    let yaml = convert(data, "Data:string<text/x-yaml>");
    assert_eq!(yaml, Value::from("- name: apple\n  qty: '3'\n"));
}

#[test]
fn test_markdown_to_html_string() {
    let markdown = convert("# Title", "string<text/markdown>:Markdown");
    let html = convert(markdown, "Markdown:string<text/html>");
    assert_eq!(html, Value::from("<h1>Title</h1>\n"));
}

#[test]
fn test_delimited_lists() {
    let items = convert("a\nb\n\nc", "string<text/x-newline-separated>:Data");
    assert_eq!(items, Value::from(json!(["a", "b", "c"])));
    let joined = convert(items, "Data:string<text/x-semicolon-separated>");
    assert_eq!(joined, Value::from("a;b;c"));
}

#[test]
fn test_dates() {
    let date = convert("2024-05-06", "string<text/x-date>:Date");
    let text = convert(date, "Date:string<text/x-date>");
    assert_eq!(text, Value::from("2024-05-06T00:00:00+00:00"));
}

#[test]
fn test_path_expression() {
    let ast = convert("$['store'].book[*]", "string<application/x-path-expression>:Ast");
    assert_eq!(ast.as_ast().unwrap().segments().len(), 3);
    let text = convert(ast, "Ast:string<application/x-path-expression>");
    assert_eq!(text, Value::from("$.store.book.*"));
}

#[test]
fn test_url_round_trip() {
    let url = convert("https://example.com/a?b=1", "string:Url");
    assert!(matches!(url, Value::Url(_)));
    assert_eq!(convert(url, "Url:string"), Value::from("https://example.com/a?b=1"));
}

#[test]
fn test_fallback_renders_plain_text() {
    let html = convert("<p>x</p>", "string<text/html>:Html");
    assert_eq!(convert(html, "Html:string<text/plain>"), Value::from("<p>x</p>"));
    assert_eq!(convert(json!([1, 2]), "Data:string"), Value::from("[1,2]"));
}

#[test]
fn test_unsupported_conversion_is_reported() {
    let url = Value::Url(url::Url::parse("https://example.com").unwrap());
    let err = registry().convert(&url, &conv("Url:Ast")).unwrap_err();
    match err {
        Error::NoConverterFound { conversion } => assert_eq!(conversion.to_string(), "Url:Ast"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_leaf_errors_name_the_conversion() {
    let err = registry()
        .convert(&Value::from("{broken"), &conv("string<application/json>:Data"))
        .unwrap_err();
    assert!(matches!(err, Error::Conversion { .. }));
    assert!(err
        .to_string()
        .starts_with("Conversion string<application/json>:Data failed: JSON error"));
}

#[test]
fn test_format_must_match_exactly() {
    // Formats are part of the request: JSON text is not parsed by the YAML converter
    let err = registry()
        .convert(&Value::from("{}"), &conv("string<application/yaml>:Data"))
        .unwrap_err();
    assert!(matches!(err, Error::NoConverterFound { .. }));
}

#[test]
fn test_convert_to_uses_the_value_tag() {
    let out = registry()
        .convert_to(&Value::from(json!({"a": 1})), TypeTag::string(Some("text/x-yaml")))
        .unwrap();
    assert_eq!(out, Value::from("a: 1\n"));
}
