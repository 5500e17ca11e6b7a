//! Shared test support utilities for integration tests

#![allow(dead_code)]

use morphic_core::{Conversion, Converter, Registry, Result, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Parse a conversion literal
pub fn conv(text: &str) -> Conversion {
    text.parse()
        .unwrap_or_else(|e| panic!("invalid conversion literal '{text}': {e}"))
}

/// The default registry
pub fn registry() -> Registry {
    Registry::default()
}

/// Convert with the default registry, panicking on failure
pub fn convert(input: impl Into<Value>, conversion: &str) -> Value {
    registry()
        .convert(&input.into(), &conv(conversion))
        .unwrap_or_else(|e| panic!("{conversion} failed: {e}"))
}

/// A converter that accepts exactly one conversion, answers with its own
/// name and counts how often it ran
pub struct Named {
    name: &'static str,
    accepts: Conversion,
    calls: AtomicUsize,
}

impl Named {
    pub fn new(name: &'static str, accepts: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            accepts: conv(accepts),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Converter for Named {
    fn name(&self) -> &str {
        self.name
    }

    fn supports(&self, _input: &Value, conversion: &Conversion) -> bool {
        conversion == &self.accepts
    }

    fn convert(&self, _input: &Value, _conversion: &Conversion) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(self.name))
    }
}
