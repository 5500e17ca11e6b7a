//! Type tags identifying a logical data type plus an optional format
//!
//! A [`TypeTag`] is the unit both sides of a [`Conversion`](crate::Conversion)
//! are made of. Its text form is `Kind` or `Kind<format>`, for example
//! `string<application/json>` or `Data`.
//!
//! Copyright (c) 2025 Morphic Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Well-known kind names used by the built-in converters
pub mod kinds {
    /// Plain structured data (objects, arrays, scalars)
    pub const DATA: &str = "Data";
    /// A raw string whose format is given by the tag
    pub const STRING: &str = "string";
    /// The formatted-string container
    pub const TEXT: &str = "Text";
    /// The any-value container
    pub const OBJECT: &str = "Object";
    pub const HTML: &str = "Html";
    pub const XML: &str = "Xml";
    pub const MARKDOWN: &str = "Markdown";
    pub const URL: &str = "Url";
    pub const AST: &str = "Ast";
    pub const DATE: &str = "Date";
}

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"^(.+?)(<(.+)>)?$").unwrap())
}

/// A logical type name with an optional MIME-like format discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeTag {
    kind: String,
    format: Option<String>,
}

impl TypeTag {
    /// Create a tag without a format
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            format: None,
        }
    }

    /// Create a tag with an optional format. An empty format is no format,
    /// since `Kind<>` has no text form.
    pub fn of(kind: impl Into<String>, format: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            format: format.filter(|f| !f.is_empty()).map(str::to_string),
        }
    }

    /// `Data`
    pub fn data() -> Self {
        Self::new(kinds::DATA)
    }

    /// `string` or `string<format>`
    pub fn string(format: Option<&str>) -> Self {
        Self::of(kinds::STRING, format)
    }

    /// `Text` or `Text<format>`
    pub fn text(format: Option<&str>) -> Self {
        Self::of(kinds::TEXT, format)
    }

    /// `Object`
    pub fn object() -> Self {
        Self::new(kinds::OBJECT)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Return a copy carrying `format`; an empty format clears it
    pub fn with_format(&self, format: impl Into<String>) -> Self {
        let format = format.into();
        Self {
            kind: self.kind.clone(),
            format: Some(format).filter(|f| !f.is_empty()),
        }
    }

    /// Return a copy without a format
    pub fn without_format(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            format: None,
        }
    }

    /// Kinds must always be equal; formats only when `exact` is set.
    pub fn matches(&self, other: &TypeTag, exact: bool) -> bool {
        self.kind == other.kind && (!exact || self.format == other.format)
    }

    /// Parse `Kind` or `Kind<format>`
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || Error::MalformedTypeTag {
            input: text.to_string(),
        };
        let captures = tag_pattern().captures(text).ok_or_else(malformed)?;
        let kind = captures.get(1).ok_or_else(malformed)?.as_str();
        let format = captures.get(3).map(|m| m.as_str().to_string());
        Ok(Self {
            kind: kind.to_string(),
            format,
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.format {
            Some(format) => write!(f, "{}<{}>", self.kind, format),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeTag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.to_string()
    }
}
