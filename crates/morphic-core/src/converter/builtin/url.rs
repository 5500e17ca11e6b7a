//! `Url` <-> `string`

use crate::converter::StringFormat;
use crate::error::Result;
use crate::tag::{kinds, TypeTag};
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFormat;

impl StringFormat for UrlFormat {
    fn name(&self) -> &str {
        "url"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::URL)
    }

    fn string_format(&self) -> Option<&str> {
        None
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(input.as_url()?.to_string())
    }

    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::Url(url::Url::parse(text.trim())?))
    }
}
