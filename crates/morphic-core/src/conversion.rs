//! Conversions: an ordered (source, target) pair of type tags
//!
//! A [`Conversion`] is both what callers request and what converters declare
//! support for. Matching between two conversions is controlled by a
//! [`MatchMode`] that decides on which sides the format must agree.
//!
//! Copyright (c) 2025 Morphic Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::tag::TypeTag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strictly two conversions are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Kind and format must agree on both sides
    Exact,
    /// Format is ignored on the source side only
    SourcePartial,
    /// Format is ignored on the target side only
    TargetPartial,
    /// Format is ignored on both sides
    Partial,
}

impl MatchMode {
    fn source_exact(self) -> bool {
        matches!(self, MatchMode::Exact | MatchMode::TargetPartial)
    }

    fn target_exact(self) -> bool {
        matches!(self, MatchMode::Exact | MatchMode::SourcePartial)
    }
}

/// A transformation from one type tag to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Conversion {
    source: TypeTag,
    target: TypeTag,
}

impl Conversion {
    pub fn new(source: TypeTag, target: TypeTag) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> &TypeTag {
        &self.source
    }

    pub fn target(&self) -> &TypeTag {
        &self.target
    }

    /// Swap source and target
    pub fn reverse(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    pub fn with_source(&self, source: TypeTag) -> Self {
        Self {
            source,
            target: self.target.clone(),
        }
    }

    pub fn with_target(&self, target: TypeTag) -> Self {
        Self {
            source: self.source.clone(),
            target,
        }
    }

    /// Whether both sides are exactly the same tag
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }

    pub fn matches(&self, other: &Conversion, mode: MatchMode) -> bool {
        self.source.matches(&other.source, mode.source_exact())
            && self.target.matches(&other.target, mode.target_exact())
    }

    /// Parse `Source:Target`, splitting on the first `:` that is neither
    /// escaped with a backslash nor inside a `<format>`.
    pub fn parse(text: &str) -> Result<Self> {
        let split = find_separator(text).ok_or_else(|| Error::MalformedConversion {
            input: text.to_string(),
            message: "expected 'Source:Target'".to_string(),
        })?;

        let (source, target) = (&text[..split], &text[split + 1..]);
        if source.is_empty() || target.is_empty() {
            return Err(Error::MalformedConversion {
                input: text.to_string(),
                message: "both sides of ':' must name a type".to_string(),
            });
        }

        Ok(Self {
            source: TypeTag::parse(&source.replace("\\:", ":"))?,
            target: TypeTag::parse(target)?,
        })
    }
}

/// The source tag's format runs from its first `<` to a `>` directly followed
/// by the separator, so formats may contain `<` and `:` freely.
fn find_separator(text: &str) -> Option<usize> {
    let mut in_format = false;
    let mut escaped = false;
    let mut previous = None;
    for (idx, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else {
            match ch {
                '\\' if !in_format => escaped = true,
                '<' => in_format = true,
                ':' if !in_format || previous == Some('>') => return Some(idx),
                _ => {}
            }
        }
        previous = Some(ch);
    }
    None
}

/// Escape colons in the kind; everything from the first `<` on is format
fn escape_separator(text: &str) -> String {
    let (kind, format) = text.split_at(text.find('<').unwrap_or(text.len()));
    format!("{}{}", kind.replace(':', "\\:"), format)
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            escape_separator(&self.source.to_string()),
            self.target
        )
    }
}

impl FromStr for Conversion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Conversion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Conversion> for String {
    fn from(conversion: Conversion) -> Self {
        conversion.to_string()
    }
}
