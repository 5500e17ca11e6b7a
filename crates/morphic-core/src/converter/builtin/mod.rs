//! Format converters registered by default
//!
//! Each module owns one relationship between a value type and its string
//! form. [`standard`] returns them in dispatch order; the order matters
//! because the dispatcher picks the first converter that accepts a request.

pub mod ast;
pub mod csv;
pub mod date;
pub mod delimited;
pub mod fallback;
pub mod html;
pub mod json;
pub mod markdown;
pub mod url;
pub mod xml;
pub mod yaml;

use super::{Converter, StringConverter};
use crate::config::EngineConfig;
use std::sync::Arc;

pub use self::ast::PathExpressionFormat;
pub use self::csv::CsvFormat;
pub use self::date::DateFormat;
pub use self::delimited::DelimitedFormat;
pub use self::fallback::ToStringConverter;
pub use self::html::HtmlFormat;
pub use self::json::JsonFormat;
pub use self::markdown::{MarkdownHtmlFormat, MarkdownSourceFormat};
pub use self::url::UrlFormat;
pub use self::xml::XmlFormat;
pub use self::yaml::YamlFormat;

/// The default converters, in dispatch order
pub fn standard(config: &EngineConfig) -> Vec<Arc<dyn Converter>> {
    vec![
        Arc::new(StringConverter::new(PathExpressionFormat)),
        Arc::new(StringConverter::new(CsvFormat::new(config.csv_delimiter_byte()))),
        Arc::new(StringConverter::new(JsonFormat::new(config.json_indent))),
        Arc::new(StringConverter::new(YamlFormat)),
        Arc::new(StringConverter::new(HtmlFormat)),
        Arc::new(StringConverter::new(MarkdownHtmlFormat)),
        Arc::new(StringConverter::new(MarkdownSourceFormat)),
        Arc::new(StringConverter::new(XmlFormat)),
        Arc::new(StringConverter::new(DateFormat::new(config.date_pattern().map(str::to_string)))),
        Arc::new(StringConverter::new(DelimitedFormat::newline())),
        Arc::new(StringConverter::new(DelimitedFormat::comma())),
        Arc::new(StringConverter::new(DelimitedFormat::semicolon())),
        Arc::new(ToStringConverter),
        Arc::new(StringConverter::new(UrlFormat)),
    ]
}
