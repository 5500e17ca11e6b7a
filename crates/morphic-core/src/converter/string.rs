//! Bidirectional converter derived from one type/string relationship
//!
//! A [`StringFormat`] declares `(target type, string format)` and implements
//! `stringify` and `parse`. [`StringConverter`] derives the two directional
//! conversions from that single declaration:
//!
//! - stringify: `Target:string<format>`
//! - parse: `string<format>:Target`
//!
//! A format may refuse one direction at convert time (Markdown cannot be
//! recovered from HTML). `supports` still reports both directions because it
//! only checks the shape of the conversion.
//!
//! Copyright (c) 2025 Morphic Team
//! Licensed under the Apache-2.0 license

use super::Converter;
use crate::conversion::{Conversion, MatchMode};
use crate::error::{Error, Result};
use crate::tag::TypeTag;
use crate::value::Value;

/// The two operations a string-backed format implements
pub trait StringFormat: Send + Sync {
    fn name(&self) -> &str;

    /// The non-string side of the relationship
    fn target(&self) -> TypeTag;

    /// Format of the string side; `None` means a plain `string`
    fn string_format(&self) -> Option<&str>;

    fn stringify(&self, input: &Value) -> Result<String>;

    fn parse(&self, text: &str) -> Result<Value>;
}

/// Serves both directions of a [`StringFormat`]
pub struct StringConverter<F> {
    format: F,
    stringify: Conversion,
    parse: Conversion,
}

impl<F: StringFormat> StringConverter<F> {
    pub fn new(format: F) -> Self {
        let stringify = Conversion::new(
            format.target(),
            TypeTag::string(format.string_format()),
        );
        let parse = stringify.reverse();
        Self {
            format,
            stringify,
            parse,
        }
    }

    pub fn stringify_conversion(&self) -> &Conversion {
        &self.stringify
    }

    pub fn parse_conversion(&self) -> &Conversion {
        &self.parse
    }

    pub fn format(&self) -> &F {
        &self.format
    }
}

impl<F: StringFormat> Converter for StringConverter<F> {
    fn name(&self) -> &str {
        self.format.name()
    }

    fn supports(&self, _input: &Value, conversion: &Conversion) -> bool {
        conversion.matches(&self.stringify, MatchMode::Exact)
            || conversion.matches(&self.parse, MatchMode::Exact)
    }

    fn convert(&self, input: &Value, conversion: &Conversion) -> Result<Value> {
        if conversion.matches(&self.stringify, MatchMode::Exact) {
            return self
                .format
                .stringify(input)
                .map(Value::String)
                .map_err(|e| e.in_conversion(conversion));
        }
        if conversion.matches(&self.parse, MatchMode::Exact) {
            let text = input.as_str()?;
            return self
                .format
                .parse(text)
                .map_err(|e| e.in_conversion(conversion));
        }
        Err(Error::UnexpectedConversion {
            converter: self.name().to_string(),
            conversion: conversion.clone(),
        })
    }
}
