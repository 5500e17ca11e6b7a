//! `Xml` <-> `string<text/xml>`

use crate::converter::StringFormat;
use crate::error::Result;
use crate::formats;
use crate::tag::{kinds, TypeTag};
use crate::value::{Value, XmlDocument};

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormat;

impl StringFormat for XmlFormat {
    fn name(&self) -> &str {
        "xml"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::XML)
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::XML)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(input.as_xml()?.to_text())
    }

    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::Xml(XmlDocument::create(text)?))
    }
}
