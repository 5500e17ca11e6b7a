//! Error types for the morphic engine
//!
//! Every failure inside the engine is reported synchronously to the immediate
//! caller as an [`Error`]. The engine never retries and never falls back to a
//! different converter; collaborators above it decide whether to log, prompt
//! or abort.

use crate::conversion::Conversion;
use thiserror::Error;

/// Main error type for morphic operations
#[derive(Error, Debug)]
pub enum Error {
    /// TypeTag text could not be parsed
    #[error("Malformed type tag: '{input}'")]
    MalformedTypeTag { input: String },

    /// Conversion text could not be parsed
    #[error("Malformed conversion '{input}': {message}")]
    MalformedConversion { input: String, message: String },

    /// No registered converter accepted the conversion
    #[error("No converter found for {conversion}")]
    NoConverterFound { conversion: Conversion },

    /// A converter was asked to perform a conversion its own `supports` rejects
    #[error("Converter '{converter}' cannot perform {conversion}")]
    UnexpectedConversion {
        converter: String,
        conversion: Conversion,
    },

    /// The missing direction of a deliberately one-way converter was invoked
    #[error("One-way conversion {conversion} is not supported: {message}")]
    OneWayConversionUnsupported {
        conversion: Conversion,
        message: String,
    },

    /// A value did not have the kind its TypeTag claims
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A leaf converter failed while performing a conversion
    #[error("Conversion {conversion} failed: {source}")]
    Conversion {
        conversion: Conversion,
        #[source]
        source: Box<Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing and serialization errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// CSV reading and writing errors
    #[error("CSV error: {message}")]
    Csv { message: String },

    /// XML reading errors and structural problems
    #[error("XML error: {message}")]
    Xml { message: String },

    /// URL parsing errors
    #[error("URL error: {message}")]
    Url {
        message: String,
        #[source]
        source: url::ParseError,
    },

    /// Date parsing errors
    #[error("Date error: {message}")]
    Date { message: String },

    /// Path expression syntax errors
    #[error("Path expression error at position {position}: {message}")]
    Ast {
        message: String,
        position: usize,
        input: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors raised by converters registered from outside this crate
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error comes from a format library rather than the engine itself
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Json { .. }
                | Self::Yaml { .. }
                | Self::Csv { .. }
                | Self::Xml { .. }
                | Self::Url { .. }
                | Self::Date { .. }
                | Self::Ast { .. }
        )
    }

    /// Whether this error signals a broken dispatcher/converter contract
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Self::UnexpectedConversion { .. } => true,
            Self::Conversion { source, .. } => source.is_contract_violation(),
            _ => false,
        }
    }

    /// Attach the attempted conversion to leaf-library errors
    pub fn in_conversion(self, conversion: &Conversion) -> Self {
        if self.is_leaf() {
            Self::Conversion {
                conversion: conversion.clone(),
                source: Box::new(self),
            }
        } else {
            self
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Url {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Date {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TypeTag;

    fn sample_conversion() -> Conversion {
        Conversion::new(TypeTag::new("Url"), TypeTag::new("Ast"))
    }

    #[test]
    fn test_error_display() {
        let err = Error::NoConverterFound {
            conversion: sample_conversion(),
        };
        assert_eq!(err.to_string(), "No converter found for Url:Ast");
    }

    #[test]
    fn test_leaf_errors_gain_conversion_context() {
        let leaf = Error::Csv {
            message: "unequal lengths".to_string(),
        };
        let wrapped = leaf.in_conversion(&sample_conversion());
        assert!(matches!(wrapped, Error::Conversion { .. }));
        assert!(wrapped.to_string().contains("Url:Ast"));
        assert!(wrapped.to_string().contains("unequal lengths"));
    }

    #[test]
    fn test_engine_errors_are_not_wrapped() {
        let err = Error::type_mismatch("Data", "Html").in_conversion(&sample_conversion());
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_contract_violation_classification() {
        let err = Error::UnexpectedConversion {
            converter: "json".to_string(),
            conversion: sample_conversion(),
        };
        assert!(err.is_contract_violation());
        assert!(!Error::configuration("bad").is_contract_violation());
    }
}
