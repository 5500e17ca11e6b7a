//! Generic containers wrapped around raw payloads
//!
//! Containers carry provenance: the `source` a value came from and the
//! `source_transformation` that produced it. Provenance is informational only;
//! the engine propagates it and never reads it back.

use super::{Source, Value};
use crate::conversion::Conversion;
use crate::tag::TypeTag;

/// Container holding any value
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectContainer {
    value: Box<Value>,
    source: Option<Source>,
    source_transformation: Option<Conversion>,
}

impl ObjectContainer {
    pub fn wrap(value: Value, source: Option<Source>) -> Self {
        Self {
            value: Box::new(value),
            source,
            source_transformation: None,
        }
    }

    /// Record the conversion that produced this container
    pub fn with_transformation(mut self, conversion: Conversion) -> Self {
        self.source_transformation = Some(conversion);
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn source_transformation(&self) -> Option<&Conversion> {
        self.source_transformation.as_ref()
    }

    pub fn unwrap(self) -> Value {
        *self.value
    }
}

/// Container holding a string together with the format it is written in
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedText {
    content: String,
    format: Option<String>,
    source: Option<Source>,
    source_transformation: Option<Conversion>,
}

impl FormattedText {
    pub fn wrap(content: impl Into<String>, format: Option<&str>, source: Option<Source>) -> Self {
        Self {
            content: content.into(),
            format: format.map(str::to_string),
            source,
            source_transformation: None,
        }
    }

    /// Record the conversion that produced this container
    pub fn with_transformation(mut self, conversion: Conversion) -> Self {
        self.source_transformation = Some(conversion);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Retag the content, e.g. after a collaborator sniffed its real format
    pub fn set_format(&mut self, format: Option<&str>) {
        self.format = format.map(str::to_string);
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn source_transformation(&self) -> Option<&Conversion> {
        self.source_transformation.as_ref()
    }

    /// `Text<format>`
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::text(self.format())
    }

    /// `string<format>`, the tag of the raw payload
    pub fn payload_tag(&self) -> TypeTag {
        TypeTag::string(self.format())
    }

    pub fn unwrap(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats;
    use serde_json::json;

    #[test]
    fn test_object_container_round_trip() {
        let container = ObjectContainer::wrap(Value::from(json!({"a": 1})), None);
        assert!(container.source().is_none());
        assert_eq!(container.unwrap(), Value::from(json!({"a": 1})));
    }

    #[test]
    fn test_formatted_text_tags() {
        let mut text = FormattedText::wrap("a: 1", Some(formats::YAML), None);
        assert_eq!(text.type_tag().to_string(), "Text<text/x-yaml>");
        assert_eq!(text.payload_tag().to_string(), "string<text/x-yaml>");

        text.set_format(Some(formats::JSON));
        assert_eq!(text.format(), Some(formats::JSON));
        assert_eq!(text.content(), "a: 1");
    }

    #[test]
    fn test_transformation_is_recorded() {
        let conversion: Conversion = "Data:Text<application/json>".parse().unwrap();
        let text = FormattedText::wrap("{}", Some(formats::JSON), None)
            .with_transformation(conversion.clone());
        assert_eq!(text.source_transformation(), Some(&conversion));
    }
}
