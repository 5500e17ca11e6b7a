//! Conversion helpers for values that are not yet [`Value`]s
//!
//! [`Convertible`] lets plain data, containers and values be converted
//! through a [`Registry`] without building a [`Conversion`] by hand.
//! [`ParseAs`] does the same for raw text in a known format.

use crate::conversion::Conversion;
use crate::error::{Error, Result};
use crate::formats;
use crate::registry::Registry;
use crate::tag::{kinds, TypeTag};
use crate::value::{FormattedText, ObjectContainer, Value};

/// Anything that can enter the engine as a [`Value`]
pub trait Convertible {
    fn to_value(&self) -> Value;

    /// Convert from this value's own type to `target`
    fn convert_to(&self, registry: &Registry, target: TypeTag) -> Result<Value> {
        registry.convert_to(&self.to_value(), target)
    }

    /// Render as text in `format`. Formatted text is parsed into data first
    /// when its format has a data representation.
    fn render_as(&self, registry: &Registry, format: &str) -> Result<String> {
        let mut value = self.to_value();
        if matches!(&value, Value::Text(text) if is_data_format(text.format())) {
            value = registry.convert_to(&value, TypeTag::data())?;
        }
        registry
            .convert_to(&value, TypeTag::string(Some(format)))?
            .into_string()
    }

    fn to_json(&self, registry: &Registry) -> Result<String> {
        self.render_as(registry, formats::JSON)
    }

    fn to_yaml(&self, registry: &Registry) -> Result<String> {
        self.render_as(registry, formats::YAML)
    }

    fn to_csv(&self, registry: &Registry) -> Result<String> {
        self.render_as(registry, formats::CSV)
    }
}

fn is_data_format(format: Option<&str>) -> bool {
    format
        .and_then(formats::default_target)
        .is_some_and(|tag| tag.is_kind(kinds::DATA))
}

impl Convertible for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Convertible for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::Data(self.clone())
    }
}

impl Convertible for ObjectContainer {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl Convertible for FormattedText {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

/// Parse raw text written in a known format
pub trait ParseAs {
    /// Parse into the type `format` naturally maps to, e.g. `Data` for JSON
    fn parse_as(&self, registry: &Registry, format: &str) -> Result<Value>;
}

impl ParseAs for str {
    fn parse_as(&self, registry: &Registry, format: &str) -> Result<Value> {
        let source = TypeTag::string(Some(format));
        let target = formats::default_target(format).ok_or_else(|| Error::NoConverterFound {
            conversion: Conversion::new(source.clone(), TypeTag::data()),
        })?;
        registry.convert(&Value::String(self.to_string()), &Conversion::new(source, target))
    }
}
