//! Values flowing through conversions
//!
//! [`Value`] is the closed set of things a converter can receive or return.
//! Domain handles (HTML/XML documents, Markdown, path-expression trees) are
//! only ever created from raw text and rendered back to text by the engine.
//!
//! Copyright (c) 2025 Morphic Team
//! Licensed under the Apache-2.0 license

pub mod ast;
pub mod container;
pub mod html;
pub mod markdown;
pub mod xml;

use crate::error::{Error, Result};
use crate::tag::{kinds, TypeTag};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

pub use ast::{Ast, Segment};
pub use container::{FormattedText, ObjectContainer};
pub use html::HtmlDocument;
pub use markdown::Markdown;
pub use xml::{XmlDocument, XmlElement, XmlNode};

/// Any value the engine can convert
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain structured data
    Data(serde_json::Value),
    /// A raw string; its format is whatever the conversion says it is
    String(String),
    /// The formatted-string container
    Text(FormattedText),
    /// The any-value container
    Object(ObjectContainer),
    Html(HtmlDocument),
    Xml(XmlDocument),
    Markdown(Markdown),
    Url(url::Url),
    Ast(Ast),
    Date(DateTime<FixedOffset>),
}

/// Where a container value came from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// The value a container was derived from
    Value(Arc<Value>),
    /// A label supplied by a collaborator, such as a file path or URL
    External(String),
}

impl Source {
    pub fn value(value: Value) -> Self {
        Source::Value(Arc::new(value))
    }

    pub fn external(label: impl Into<String>) -> Self {
        Source::External(label.into())
    }
}

impl Value {
    /// The tag describing this value; containers report their own tag.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Data(_) => TypeTag::data(),
            Value::String(_) => TypeTag::string(None),
            Value::Text(text) => text.type_tag(),
            Value::Object(_) => TypeTag::object(),
            Value::Html(_) => TypeTag::new(kinds::HTML),
            Value::Xml(_) => TypeTag::new(kinds::XML),
            Value::Markdown(_) => TypeTag::new(kinds::MARKDOWN),
            Value::Url(_) => TypeTag::new(kinds::URL),
            Value::Ast(_) => TypeTag::new(kinds::AST),
            Value::Date(_) => TypeTag::new(kinds::DATE),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Data(_) => kinds::DATA,
            Value::String(_) => kinds::STRING,
            Value::Text(_) => kinds::TEXT,
            Value::Object(_) => kinds::OBJECT,
            Value::Html(_) => kinds::HTML,
            Value::Xml(_) => kinds::XML,
            Value::Markdown(_) => kinds::MARKDOWN,
            Value::Url(_) => kinds::URL,
            Value::Ast(_) => kinds::AST,
            Value::Date(_) => kinds::DATE,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Text(_) | Value::Object(_))
    }

    /// Provenance carried by a container, if any
    pub fn source(&self) -> Option<&Source> {
        match self {
            Value::Text(text) => text.source(),
            Value::Object(object) => object.source(),
            _ => None,
        }
    }

    /// Plain-text rendering used by the generic to-string converter
    pub fn to_text(&self) -> String {
        match self {
            Value::Data(serde_json::Value::String(s)) => s.clone(),
            Value::Data(data) => data.to_string(),
            Value::String(s) => s.clone(),
            Value::Text(text) => text.content().to_string(),
            Value::Object(object) => object.value().to_text(),
            Value::Html(html) => html.to_text(),
            Value::Xml(xml) => xml.to_text(),
            Value::Markdown(markdown) => markdown.to_text(),
            Value::Url(url) => url.as_str().to_string(),
            Value::Ast(ast) => ast.to_text(),
            Value::Date(date) => date.to_rfc3339(),
        }
    }

    pub fn as_data(&self) -> Result<&serde_json::Value> {
        match self {
            Value::Data(data) => Ok(data),
            _ => Err(self.mismatch(kinds::DATA)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(kinds::STRING)),
        }
    }

    pub fn as_html(&self) -> Result<&HtmlDocument> {
        match self {
            Value::Html(html) => Ok(html),
            _ => Err(self.mismatch(kinds::HTML)),
        }
    }

    pub fn as_xml(&self) -> Result<&XmlDocument> {
        match self {
            Value::Xml(xml) => Ok(xml),
            _ => Err(self.mismatch(kinds::XML)),
        }
    }

    pub fn as_markdown(&self) -> Result<&Markdown> {
        match self {
            Value::Markdown(markdown) => Ok(markdown),
            _ => Err(self.mismatch(kinds::MARKDOWN)),
        }
    }

    pub fn as_url(&self) -> Result<&url::Url> {
        match self {
            Value::Url(url) => Ok(url),
            _ => Err(self.mismatch(kinds::URL)),
        }
    }

    pub fn as_ast(&self) -> Result<&Ast> {
        match self {
            Value::Ast(ast) => Ok(ast),
            _ => Err(self.mismatch(kinds::AST)),
        }
    }

    pub fn as_date(&self) -> Result<&DateTime<FixedOffset>> {
        match self {
            Value::Date(date) => Ok(date),
            _ => Err(self.mismatch(kinds::DATE)),
        }
    }

    /// Consume a string-like value, unwrapping a formatted-text container
    pub fn into_string(self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s),
            Value::Text(text) => Ok(text.unwrap()),
            other => Err(Error::type_mismatch(kinds::STRING, other.type_tag().to_string())),
        }
    }

    /// Consume a data value, unwrapping an object container
    pub fn into_data(self) -> Result<serde_json::Value> {
        match self {
            Value::Data(data) => Ok(data),
            Value::Object(object) => object.unwrap().into_data(),
            other => Err(Error::type_mismatch(kinds::DATA, other.type_tag().to_string())),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.type_tag().to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Data(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<FormattedText> for Value {
    fn from(value: FormattedText) -> Self {
        Value::Text(value)
    }
}

impl From<ObjectContainer> for Value {
    fn from(value: ObjectContainer) -> Self {
        Value::Object(value)
    }
}

impl From<HtmlDocument> for Value {
    fn from(value: HtmlDocument) -> Self {
        Value::Html(value)
    }
}

impl From<XmlDocument> for Value {
    fn from(value: XmlDocument) -> Self {
        Value::Xml(value)
    }
}

impl From<Markdown> for Value {
    fn from(value: Markdown) -> Self {
        Value::Markdown(value)
    }
}

impl From<url::Url> for Value {
    fn from(value: url::Url) -> Self {
        Value::Url(value)
    }
}

impl From<Ast> for Value {
    fn from(value: Ast) -> Self {
        Value::Ast(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats;
    use serde_json::json;

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::from(json!({"a": 1})).type_tag(), TypeTag::data());
        assert_eq!(Value::from("x").type_tag(), TypeTag::string(None));
        let text = FormattedText::wrap("a,b", Some(formats::CSV), None);
        assert_eq!(Value::from(text).type_tag().to_string(), "Text<text/csv>");
        let object = ObjectContainer::wrap(Value::from(json!(1)), None);
        assert_eq!(Value::from(object).type_tag(), TypeTag::object());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::from(json!({"a": 1})).to_text(), "{\"a\":1}");
        assert_eq!(Value::from(json!("plain")).to_text(), "plain");
        let url = url::Url::parse("https://example.com/a").unwrap();
        assert_eq!(Value::from(url).to_text(), "https://example.com/a");
    }

    #[test]
    fn test_accessor_reports_mismatch() {
        let err = Value::from("x").as_data().unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: expected Data, found string");
    }

    #[test]
    fn test_into_string_unwraps_text_container() {
        let text = FormattedText::wrap("{}", Some(formats::JSON), None);
        assert_eq!(Value::from(text).into_string().unwrap(), "{}");
    }

    #[test]
    fn test_container_source_is_exposed() {
        let object = ObjectContainer::wrap(Value::from(json!(1)), Some(Source::external("a.json")));
        assert_eq!(
            Value::from(object).source(),
            Some(&Source::External("a.json".to_string()))
        );
    }
}
