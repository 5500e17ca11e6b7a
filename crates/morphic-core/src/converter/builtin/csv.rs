//! `Data` <-> `string<text/csv>`
//!
//! Parsing reads the first record as headers and yields an array of objects
//! whose cells are all strings. Writing accepts either an array of objects,
//! whose header row is the union of keys in first-seen order, or an array of
//! arrays written without a header.

use crate::converter::StringFormat;
use crate::error::{Error, Result};
use crate::formats;
use crate::tag::TypeTag;
use crate::value::Value;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone)]
pub struct CsvFormat {
    delimiter: u8,
}

impl CsvFormat {
    /// `delimiter` must be a single ASCII character
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn write_rows(&self, rows: &[JsonValue]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        if rows.iter().all(JsonValue::is_object) {
            let headers = collect_headers(rows);
            writer.write_record(&headers)?;
            for row in rows.iter().filter_map(JsonValue::as_object) {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|key| row.get(key).map(cell_to_string).unwrap_or_default())
                    .collect();
                writer.write_record(&cells)?;
            }
        } else if rows.iter().all(JsonValue::is_array) {
            for row in rows.iter().filter_map(JsonValue::as_array) {
                let cells: Vec<String> = row.iter().map(cell_to_string).collect();
                writer.write_record(&cells)?;
            }
        } else {
            return Err(Error::Csv {
                message: "rows must be all objects or all arrays".to_string(),
            });
        }

        let bytes = writer.into_inner().map_err(|e| Error::Csv {
            message: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| Error::Csv {
            message: e.to_string(),
        })
    }
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self::new(b',')
    }
}

fn collect_headers(rows: &[JsonValue]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows.iter().filter_map(JsonValue::as_object) {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

fn cell_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

impl StringFormat for CsvFormat {
    fn name(&self) -> &str {
        "csv"
    }

    fn target(&self) -> TypeTag {
        TypeTag::data()
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::CSV)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        match input.as_data()? {
            JsonValue::Array(rows) if rows.is_empty() => Ok(String::new()),
            JsonValue::Array(rows) => self.write_rows(rows),
            other => Err(Error::Csv {
                message: format!("expected an array of rows, found {}", json_kind(other)),
            }),
        }
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Map<String, JsonValue> = headers
                .iter()
                .zip(record.iter())
                .map(|(key, cell)| (key.to_string(), JsonValue::String(cell.to_string())))
                .collect();
            rows.push(JsonValue::Object(row));
        }
        Ok(Value::Data(JsonValue::Array(rows)))
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
