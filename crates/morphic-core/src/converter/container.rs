//! Container layers that strip and reapply wrappers around a delegate
//!
//! A [`ContainerConverter`] handles one container kind. Given an input and a
//! conversion it:
//!
//! 1. unwraps the input when it is that container (always, whatever the
//!    conversion says),
//! 2. rewrites whichever side of the conversion names the container into the
//!    matching payload tag,
//! 3. runs the rewritten conversion through its delegate, or skips the
//!    delegate when the rewritten conversion is an identity,
//! 4. wraps the result again when the requested target is the container,
//!    recording where the value came from and the conversion as requested.
//!
//! Inputs and conversions that never mention the container pass straight
//! through to the delegate.

use super::Converter;
use crate::conversion::Conversion;
use crate::error::{Error, Result};
use crate::tag::{kinds, TypeTag};
use crate::value::{FormattedText, ObjectContainer, Source, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// An unwrapped container input
#[derive(Debug)]
pub struct Opened<'a> {
    /// The raw value inside the container
    pub payload: Cow<'a, Value>,
    /// Tag describing the payload
    pub tag: TypeTag,
    /// Provenance the container carried
    pub source: Option<Source>,
}

/// How one container kind is opened and closed
pub trait ContainerKind: Send + Sync {
    /// The tag kind naming this container, e.g. `Text`
    fn kind(&self) -> &'static str;

    /// Unwrap `input` if it is this container. `requested` is the source
    /// side of the conversion and may refine the payload tag.
    fn open<'a>(&self, input: &'a Value, requested: &TypeTag) -> Option<Opened<'a>>;

    /// Payload tag for a source side naming this container when the input
    /// arrived unwrapped
    fn payload_source(&self, input: &Value, requested: &TypeTag) -> TypeTag;

    /// Payload tag for a target side naming this container
    fn payload_target(&self, requested: &TypeTag) -> TypeTag;

    /// Wrap a converted payload
    fn close(
        &self,
        payload: Value,
        requested: &TypeTag,
        source: Source,
        transformation: &Conversion,
    ) -> Result<Value>;
}

/// The any-value container. Its payload is described by its own type tag
/// and a target `Object` holds plain data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectKind;

impl ContainerKind for ObjectKind {
    fn kind(&self) -> &'static str {
        kinds::OBJECT
    }

    fn open<'a>(&self, input: &'a Value, _requested: &TypeTag) -> Option<Opened<'a>> {
        match input {
            Value::Object(object) => Some(Opened {
                payload: Cow::Borrowed(object.value()),
                tag: object.value().type_tag(),
                source: object.source().cloned(),
            }),
            _ => None,
        }
    }

    fn payload_source(&self, input: &Value, _requested: &TypeTag) -> TypeTag {
        input.type_tag()
    }

    fn payload_target(&self, _requested: &TypeTag) -> TypeTag {
        TypeTag::data()
    }

    fn close(
        &self,
        payload: Value,
        _requested: &TypeTag,
        source: Source,
        transformation: &Conversion,
    ) -> Result<Value> {
        Ok(Value::Object(
            ObjectContainer::wrap(payload, Some(source)).with_transformation(transformation.clone()),
        ))
    }
}

/// The formatted-string container: `Text<f>` holds a `string<f>`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextKind;

impl TextKind {
    fn requested_format(requested: &TypeTag) -> Option<&str> {
        if requested.is_kind(kinds::TEXT) {
            requested.format()
        } else {
            None
        }
    }
}

impl ContainerKind for TextKind {
    fn kind(&self) -> &'static str {
        kinds::TEXT
    }

    fn open<'a>(&self, input: &'a Value, requested: &TypeTag) -> Option<Opened<'a>> {
        match input {
            Value::Text(text) => {
                // The conversion may know better than the container what the content is
                let format = Self::requested_format(requested).or(text.format());
                Some(Opened {
                    payload: Cow::Owned(Value::String(text.content().to_string())),
                    tag: TypeTag::string(format),
                    source: text.source().cloned(),
                })
            }
            _ => None,
        }
    }

    fn payload_source(&self, _input: &Value, requested: &TypeTag) -> TypeTag {
        TypeTag::string(Self::requested_format(requested))
    }

    fn payload_target(&self, requested: &TypeTag) -> TypeTag {
        TypeTag::string(requested.format())
    }

    fn close(
        &self,
        payload: Value,
        requested: &TypeTag,
        source: Source,
        transformation: &Conversion,
    ) -> Result<Value> {
        let content = match payload {
            Value::String(content) => content,
            other => return Err(Error::type_mismatch(kinds::STRING, other.type_tag().to_string())),
        };
        Ok(Value::Text(
            FormattedText::wrap(content, requested.format(), Some(source))
                .with_transformation(transformation.clone()),
        ))
    }
}

/// What a container layer will do with one request
struct Plan<'a> {
    payload: Cow<'a, Value>,
    inner: Conversion,
    carried: Option<Source>,
    wrap: bool,
    /// Whether either side of the request names the container
    mentioned: bool,
}

/// Strips one container kind off inputs and conversions before delegating
pub struct ContainerConverter<K> {
    kind: K,
    name: String,
    delegate: Arc<dyn Converter>,
}

impl<K: ContainerKind> ContainerConverter<K> {
    pub fn new(kind: K, delegate: Arc<dyn Converter>) -> Self {
        let name = format!("{}-container", kind.kind().to_ascii_lowercase());
        Self {
            kind,
            name,
            delegate,
        }
    }

    pub fn delegate(&self) -> &Arc<dyn Converter> {
        &self.delegate
    }

    /// `None` when neither the input nor the conversion involve the container
    fn plan<'a>(&self, input: &'a Value, conversion: &Conversion) -> Option<Plan<'a>> {
        let kind = self.kind.kind();
        let source_is_container = conversion.source().is_kind(kind);
        let target_is_container = conversion.target().is_kind(kind);
        let opened = self.kind.open(input, conversion.source());

        if opened.is_none() && !source_is_container && !target_is_container {
            return None;
        }

        let (payload, opened_tag, carried) = match opened {
            Some(opened) => (opened.payload, Some(opened.tag), opened.source),
            None => (Cow::Borrowed(input), None, None),
        };

        let source = if source_is_container {
            opened_tag.unwrap_or_else(|| self.kind.payload_source(input, conversion.source()))
        } else {
            conversion.source().clone()
        };
        let target = if target_is_container {
            self.kind.payload_target(conversion.target())
        } else {
            conversion.target().clone()
        };

        Some(Plan {
            payload,
            inner: Conversion::new(source, target),
            carried,
            wrap: target_is_container,
            mentioned: source_is_container || target_is_container,
        })
    }
}

impl<K: ContainerKind> Converter for ContainerConverter<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, input: &Value, conversion: &Conversion) -> bool {
        match self.plan(input, conversion) {
            // A request naming the container is claimed here; failures surface at convert
            Some(plan) if plan.mentioned => true,
            Some(plan) => {
                plan.inner.is_identity() || self.delegate.supports(&plan.payload, &plan.inner)
            }
            None => self.delegate.supports(input, conversion),
        }
    }

    fn convert(&self, input: &Value, conversion: &Conversion) -> Result<Value> {
        let Some(plan) = self.plan(input, conversion) else {
            return self.delegate.convert(input, conversion);
        };

        let output = if plan.inner.is_identity() {
            plan.payload.into_owned()
        } else {
            log::trace!("{}: {} -> {}", self.name, conversion, plan.inner);
            self.delegate
                .convert(&plan.payload, &plan.inner)
                .map_err(|e| match e {
                    Error::NoConverterFound { .. } => Error::NoConverterFound {
                        conversion: conversion.clone(),
                    },
                    other => other,
                })?
        };

        if !plan.wrap {
            return Ok(output);
        }
        let source = plan
            .carried
            .unwrap_or_else(|| Source::value(input.clone()));
        self.kind
            .close(output, conversion.target(), source, conversion)
    }
}
