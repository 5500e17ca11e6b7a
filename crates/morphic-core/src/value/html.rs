//! Opaque HTML document handle
//!
//! The engine only creates it from markup and renders it back.

use regex::Regex;
use std::sync::OnceLock;

static TITLE_PATTERN: OnceLock<Regex> = OnceLock::new();
static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

/// An HTML document kept as its markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    markup: String,
}

impl HtmlDocument {
    pub fn create(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn to_text(&self) -> String {
        self.markup.clone()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Contents of the first `<title>` element, if present
    pub fn title(&self) -> Option<String> {
        let pattern = TITLE_PATTERN
            .get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
        pattern
            .captures(&self.markup)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Visible text with tags stripped and whitespace collapsed
    pub fn text_content(&self) -> String {
        let pattern = TAG_PATTERN.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap());
        let stripped = pattern.replace_all(&self.markup, " ");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_text_content() {
        let doc = HtmlDocument::create(
            "<html><head><title> Report </title></head><body><h1>Hi</h1><p>there</p></body></html>",
        );
        assert_eq!(doc.title().as_deref(), Some("Report"));
        assert_eq!(doc.text_content(), "Report Hi there");
    }

    #[test]
    fn test_markup_is_preserved() {
        let markup = "<p>a &amp; b</p>\n";
        assert_eq!(HtmlDocument::create(markup).to_text(), markup);
    }
}
