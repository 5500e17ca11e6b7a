//! Markdown converters
//!
//! Two relationships share the `Markdown` type:
//!
//! - [`MarkdownHtmlFormat`]: `Markdown -> string<text/html>`. Rendering is
//!   lossy, so the reverse direction fails with
//!   [`Error::OneWayConversionUnsupported`].
//! - [`MarkdownSourceFormat`]: `Markdown <-> string<text/markdown>`, the raw
//!   source in both directions.

use crate::conversion::Conversion;
use crate::converter::StringFormat;
use crate::error::{Error, Result};
use crate::formats;
use crate::tag::{kinds, TypeTag};
use crate::value::{Markdown, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownHtmlFormat;

impl StringFormat for MarkdownHtmlFormat {
    fn name(&self) -> &str {
        "markdown-html"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::MARKDOWN)
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::HTML)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(input.as_markdown()?.to_html())
    }

    fn parse(&self, _text: &str) -> Result<Value> {
        Err(Error::OneWayConversionUnsupported {
            conversion: Conversion::new(TypeTag::string(Some(formats::HTML)), self.target()),
            message: "HTML cannot be converted back to Markdown".to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSourceFormat;

impl StringFormat for MarkdownSourceFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::MARKDOWN)
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::MARKDOWN)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(input.as_markdown()?.to_text())
    }

    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::Markdown(Markdown::create(text)))
    }
}
