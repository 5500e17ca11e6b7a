//! First-match-wins dispatch over an ordered list of converters

use super::Converter;
use crate::conversion::Conversion;
use crate::error::{Error, Result};
use crate::value::Value;
use std::sync::Arc;

/// Tries converters in registration order and uses the first that supports
/// the request. Order is significant: an earlier converter claiming a
/// conversion shadows every later one.
#[derive(Clone, Default)]
pub struct Dispatcher {
    converters: Vec<Arc<dyn Converter>>,
}

impl Dispatcher {
    pub fn new(converters: Vec<Arc<dyn Converter>>) -> Self {
        Self { converters }
    }

    pub fn push(&mut self, converter: Arc<dyn Converter>) {
        self.converters.push(converter);
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    pub fn converters(&self) -> &[Arc<dyn Converter>] {
        &self.converters
    }

    /// The converter that would handle this request
    pub fn select(&self, input: &Value, conversion: &Conversion) -> Option<&Arc<dyn Converter>> {
        self.converters
            .iter()
            .find(|converter| converter.supports(input, conversion))
    }
}

impl Converter for Dispatcher {
    fn name(&self) -> &str {
        "dispatcher"
    }

    fn supports(&self, input: &Value, conversion: &Conversion) -> bool {
        self.select(input, conversion).is_some()
    }

    fn convert(&self, input: &Value, conversion: &Conversion) -> Result<Value> {
        let converter = self
            .select(input, conversion)
            .ok_or_else(|| Error::NoConverterFound {
                conversion: conversion.clone(),
            })?;
        log::debug!("{} handled by {}", conversion, converter.name());
        converter.convert(input, conversion)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.converters.iter().map(|c| c.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed {
        name: &'static str,
        accepts: Option<&'static str>,
    }

    impl Converter for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn supports(&self, _input: &Value, conversion: &Conversion) -> bool {
            match self.accepts {
                Some(accepted) => conversion.to_string() == accepted,
                None => true,
            }
        }

        fn convert(&self, _input: &Value, _conversion: &Conversion) -> Result<Value> {
            Ok(Value::from(self.name))
        }
    }

    fn fixed(name: &'static str, accepts: Option<&'static str>) -> Arc<dyn Converter> {
        Arc::new(Fixed { name, accepts })
    }

    #[test]
    fn test_first_match_wins() {
        let dispatcher = Dispatcher::new(vec![
            fixed("narrow", Some("Data:string")),
            fixed("first", None),
            fixed("second", None),
        ]);
        let input = Value::from(json!(1));

        let out = dispatcher.convert(&input, &"Data:string".parse().unwrap()).unwrap();
        assert_eq!(out, Value::from("narrow"));

        let out = dispatcher.convert(&input, &"Data:Html".parse().unwrap()).unwrap();
        assert_eq!(out, Value::from("first"));
    }

    #[test]
    fn test_no_converter_found() {
        let dispatcher = Dispatcher::new(vec![fixed("narrow", Some("Data:string"))]);
        let conversion: Conversion = "Url:Ast".parse().unwrap();
        let input = Value::from("https://example.com");

        assert!(!dispatcher.supports(&input, &conversion));
        let err = dispatcher.convert(&input, &conversion).unwrap_err();
        assert_eq!(err.to_string(), "No converter found for Url:Ast");
    }

    #[test]
    fn test_empty_dispatcher() {
        let dispatcher = Dispatcher::default();
        assert!(dispatcher.is_empty());
        assert!(dispatcher
            .convert(&Value::from("x"), &"string:Data".parse().unwrap())
            .is_err());
    }
}
