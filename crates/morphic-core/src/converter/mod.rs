//! Converter capability contract and the strategies built on it
//!
//! # Module Organization
//!
//! - [`string`] - one declared type/string relationship served in both directions
//! - [`container`] - strips and reapplies generic containers around a delegate
//! - [`dispatcher`] - ordered, first-match-wins list of converters
//! - [`builtin`] - the format converters registered by default
//!
//! # Example
//!
//! ```
//! use morphic_core::{Conversion, Registry, Value};
//! use serde_json::json;
//!
//! let registry = Registry::default();
//! let conversion: Conversion = "Data:string<application/json>".parse().unwrap();
//! let text = registry.convert(&Value::from(json!({"a": 1})), &conversion).unwrap();
//! assert_eq!(text, Value::from("{\n  \"a\": 1\n}"));
//! ```
//!
//! Copyright (c) 2025 Morphic Team
//! Licensed under the Apache-2.0 license

pub mod builtin;
pub mod container;
pub mod dispatcher;
pub mod string;

use crate::conversion::Conversion;
use crate::error::Result;
use crate::value::Value;

pub use container::{ContainerConverter, ContainerKind, ObjectKind, TextKind};
pub use dispatcher::Dispatcher;
pub use string::{StringConverter, StringFormat};

/// A unit able to perform one or more conversions
///
/// `supports` is a pure predicate and must not fail. `convert` may assume
/// `supports` returned true for the same arguments; when it did not, the
/// converter reports [`Error::UnexpectedConversion`](crate::Error::UnexpectedConversion).
/// Both must depend only on their arguments.
pub trait Converter: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    fn supports(&self, input: &Value, conversion: &Conversion) -> bool;

    fn convert(&self, input: &Value, conversion: &Conversion) -> Result<Value>;
}
