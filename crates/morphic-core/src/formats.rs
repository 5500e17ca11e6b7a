//! Recognized format strings and their canonical file extensions

use crate::tag::{kinds, TypeTag};

pub const CSV: &str = "text/csv";
pub const HTML: &str = "text/html";
pub const JSON: &str = "application/json";
pub const YAML: &str = "text/x-yaml";
pub const XML: &str = "text/xml";
pub const MARKDOWN: &str = "text/markdown";
pub const DATE: &str = "text/x-date";
pub const NEWLINE_SEPARATED: &str = "text/x-newline-separated";
pub const COMMA_SEPARATED: &str = "text/x-comma-separated";
pub const SEMICOLON_SEPARATED: &str = "text/x-semicolon-separated";
pub const PATH_EXPRESSION: &str = "application/x-path-expression";
pub const PLAIN: &str = "text/plain";

/// Every format the extension table knows about, in table order
pub const KNOWN_FORMATS: [&str; 10] = [
    CSV,
    HTML,
    JSON,
    YAML,
    XML,
    MARKDOWN,
    DATE,
    NEWLINE_SEPARATED,
    COMMA_SEPARATED,
    SEMICOLON_SEPARATED,
];

/// Canonical file extension for a format; unknown or missing formats map to `txt`.
///
/// Newline-separated text maps to `json`, unlike its comma and semicolon
/// siblings. Existing files written by earlier tooling rely on that.
pub fn to_ext(format: Option<&str>) -> &'static str {
    match format {
        Some(CSV) => "csv",
        Some(HTML) => "html",
        Some(JSON) => "json",
        Some(YAML) => "yaml",
        Some(XML) => "xml",
        Some(MARKDOWN) => "md",
        Some(DATE) => "date",
        Some(NEWLINE_SEPARATED) => "json",
        Some(COMMA_SEPARATED) | Some(SEMICOLON_SEPARATED) => "txt",
        _ => "txt",
    }
}

/// Format string for a file extension, for collaborators that read files
pub fn from_ext(ext: &str) -> Option<&'static str> {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "csv" => Some(CSV),
        "html" | "htm" => Some(HTML),
        "json" => Some(JSON),
        "yaml" | "yml" => Some(YAML),
        "xml" => Some(XML),
        "md" | "markdown" => Some(MARKDOWN),
        "date" => Some(DATE),
        _ => None,
    }
}

/// The type a string in `format` naturally parses into
pub fn default_target(format: &str) -> Option<TypeTag> {
    let kind = match format {
        CSV | JSON | YAML | NEWLINE_SEPARATED | COMMA_SEPARATED | SEMICOLON_SEPARATED => {
            kinds::DATA
        }
        HTML => kinds::HTML,
        XML => kinds::XML,
        MARKDOWN => kinds::MARKDOWN,
        DATE => kinds::DATE,
        PATH_EXPRESSION => kinds::AST,
        _ => return None,
    };
    Some(TypeTag::new(kind))
}
