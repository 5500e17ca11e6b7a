//! The converter registry
//!
//! A [`Registry`] is the root of every conversion: an ordered dispatcher of
//! leaf converters, wrapped by the text-container layer and then by the
//! object-container layer. It is immutable once built and cheap to clone.
//!
//! [`registry()`] returns the process-wide default, built on first use.
//!
//! Copyright (c) 2025 Morphic Team
//! Licensed under the Apache-2.0 license

use crate::config::EngineConfig;
use crate::conversion::Conversion;
use crate::converter::{
    builtin, ContainerConverter, Converter, Dispatcher, ObjectKind, TextKind,
};
use crate::error::Result;
use crate::tag::TypeTag;
use crate::value::Value;
use std::sync::{Arc, OnceLock};

/// Ordered, first-match-wins converter registry
#[derive(Clone)]
pub struct Registry {
    root: Arc<dyn Converter>,
    dispatcher: Arc<Dispatcher>,
}

impl Registry {
    /// Start an empty registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in converters configured by `config`
    pub fn standard(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::builder().register_all(builtin::standard(config)).build())
    }

    /// Convert `input` as described by `conversion`
    pub fn convert(&self, input: &Value, conversion: &Conversion) -> Result<Value> {
        self.root.convert(input, conversion)
    }

    /// Convert `input` from its own type to `target`
    pub fn convert_to(&self, input: &Value, target: TypeTag) -> Result<Value> {
        let conversion = Conversion::new(input.type_tag(), target);
        self.convert(input, &conversion)
    }

    /// Whether some converter accepts the request
    pub fn supports(&self, input: &Value, conversion: &Conversion) -> bool {
        self.root.supports(input, conversion)
    }

    /// Names of the leaf converters in dispatch order
    pub fn converter_names(&self) -> Vec<&str> {
        self.dispatcher
            .converters()
            .iter()
            .map(|converter| converter.name())
            .collect()
    }

    /// The converter the dispatcher would pick for an already unwrapped request
    pub fn select(&self, input: &Value, conversion: &Conversion) -> Option<&str> {
        self.dispatcher
            .select(input, conversion)
            .map(|converter| converter.name())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builder()
            .register_all(builtin::standard(&EngineConfig::default()))
            .build()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("converters", &self.converter_names())
            .finish()
    }
}

/// Builder for a [`Registry`]. Registration is append-only and order is
/// dispatch order.
#[derive(Default)]
pub struct RegistryBuilder {
    dispatcher: Dispatcher,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a converter
    pub fn register(mut self, converter: impl Converter + 'static) -> Self {
        self.dispatcher.push(Arc::new(converter));
        self
    }

    /// Append an already shared converter
    pub fn register_arc(mut self, converter: Arc<dyn Converter>) -> Self {
        self.dispatcher.push(converter);
        self
    }

    /// Append several converters, keeping their order
    pub fn register_all<I>(mut self, converters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Converter>>,
    {
        for converter in converters {
            self.dispatcher.push(converter);
        }
        self
    }

    /// Wrap the dispatcher in the container layers
    pub fn build(self) -> Registry {
        let dispatcher = Arc::new(self.dispatcher);
        log::debug!("Building registry with {} converters", dispatcher.len());
        let text = ContainerConverter::new(TextKind, dispatcher.clone());
        let object = ContainerConverter::new(ObjectKind, Arc::new(text));
        Registry {
            root: Arc::new(object),
            dispatcher,
        }
    }
}

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry with default settings, built once on first use
pub fn registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(Registry::default)
}
