//! `Date` <-> `string<text/x-date>`
//!
//! Without a configured pattern dates are written as RFC 3339. Parsing
//! accepts RFC 3339 and bare `YYYY-MM-DD` dates, which become midnight UTC.
//! A configured pattern is tried first in both directions.

use crate::converter::StringFormat;
use crate::error::{Error, Result};
use crate::formats;
use crate::tag::{kinds, TypeTag};
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, Default)]
pub struct DateFormat {
    pattern: Option<String>,
}

impl DateFormat {
    pub fn new(pattern: Option<String>) -> Self {
        Self { pattern }
    }

    fn parse_with_pattern(text: &str, pattern: &str) -> Option<DateTime<FixedOffset>> {
        if let Ok(date) = DateTime::parse_from_str(text, pattern) {
            return Some(date);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(utc(naive));
        }
        NaiveDate::parse_from_str(text, pattern)
            .ok()
            .map(|date| utc(date.and_time(NaiveTime::MIN)))
    }
}

fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}

impl StringFormat for DateFormat {
    fn name(&self) -> &str {
        "date"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::DATE)
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::DATE)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        let date = input.as_date()?;
        Ok(match &self.pattern {
            Some(pattern) => date.format(pattern).to_string(),
            None => date.to_rfc3339(),
        })
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let text = text.trim();
        if let Some(date) = self
            .pattern
            .as_deref()
            .and_then(|pattern| Self::parse_with_pattern(text, pattern))
        {
            return Ok(Value::Date(date));
        }
        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Ok(Value::Date(date));
        }
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| Error::Date {
            message: format!("'{text}' is not a recognized date: {e}"),
        })?;
        Ok(Value::Date(utc(date.and_time(NaiveTime::MIN))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_round_trip() {
        let value = DateFormat::default().parse("2024-03-01T10:30:00+02:00").unwrap();
        assert_eq!(
            DateFormat::default().stringify(&value).unwrap(),
            "2024-03-01T10:30:00+02:00"
        );
    }

    #[test]
    fn test_bare_date_is_midnight_utc() {
        let value = DateFormat::default().parse("2024-03-01").unwrap();
        assert_eq!(
            DateFormat::default().stringify(&value).unwrap(),
            "2024-03-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_configured_pattern() {
        let format = DateFormat::new(Some("%d/%m/%Y".to_string()));
        let value = format.parse("01/03/2024").unwrap();
        assert_eq!(format.stringify(&value).unwrap(), "01/03/2024");
        // RFC 3339 still parses when the pattern does not match
        assert!(format.parse("2024-03-01T00:00:00Z").is_ok());
    }

    #[test]
    fn test_unrecognized_date() {
        let err = DateFormat::default().parse("yesterday").unwrap_err();
        assert!(matches!(err, Error::Date { .. }));
    }
}
