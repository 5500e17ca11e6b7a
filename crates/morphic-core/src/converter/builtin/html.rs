//! `Html` <-> `string<text/html>`

use crate::converter::StringFormat;
use crate::error::Result;
use crate::formats;
use crate::tag::{kinds, TypeTag};
use crate::value::{HtmlDocument, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl StringFormat for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::HTML)
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::HTML)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(input.as_html()?.to_text())
    }

    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::Html(HtmlDocument::create(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_is_kept_verbatim() {
        let markup = "<html><head><title>T</title></head><body><p>x</p></body></html>";
        let value = HtmlFormat.parse(markup).unwrap();
        assert_eq!(value.as_html().unwrap().title().as_deref(), Some("T"));
        assert_eq!(HtmlFormat.stringify(&value).unwrap(), markup);
    }
}
