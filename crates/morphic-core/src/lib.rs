//! Morphic Core - Registry-driven conversion engine
//!
//! This crate converts values between structured data, formatted text and
//! document handles. Every request names its source and target with
//! [`TypeTag`]s; an ordered registry of converters resolves it.
//!
//! # Main Components
//!
//! - **Type tags and conversions**: `Kind<format>` names and `Source:Target` pairs
//! - **Values**: data, strings, document handles and the two generic containers
//! - **Converters**: the [`Converter`] contract, bidirectional string formats
//!   and the container layers
//! - **Registry**: first-match-wins dispatch over the built-in converters
//!
//! # Example
//!
//! ```
//! use morphic_core::{Conversion, Registry, Value};
//!
//! let registry = Registry::default();
//! let conversion: Conversion = "string<text/x-yaml>:Data".parse()?;
//! let data = registry.convert(&Value::from("- a: 1"), &conversion)?;
//! assert_eq!(data, Value::from(serde_json::json!([{"a": 1}])));
//! # Ok::<(), morphic_core::Error>(())
//! ```

pub mod config;
pub mod conversion;
pub mod converter;
pub mod convertible;
pub mod error;
pub mod formats;
pub mod registry;
pub mod tag;
pub mod value;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use conversion::{Conversion, MatchMode};
pub use converter::{
    ContainerConverter, ContainerKind, Converter, Dispatcher, ObjectKind, StringConverter,
    StringFormat, TextKind,
};
pub use convertible::{Convertible, ParseAs};
pub use error::{Error, Result};
pub use registry::{registry, Registry, RegistryBuilder};
pub use tag::{kinds, TypeTag};
pub use value::{FormattedText, ObjectContainer, Source, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
