//! Typed access to intent arguments.
//!
//! Classifiers deliver every argument as a string, direct API callers may
//! send numbers or booleans. Both are accepted; anything that does not
//! parse is rejected with a [`ValidationError`] rather than coerced.

use mitra_core::ValidationError;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Borrowed view over an intent's argument object.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    pub fn new(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            other => Err(ValidationError::InvalidValue {
                field: "arguments".to_string(),
                reason: format!("expected an object, got {}", other),
            }),
        }
    }

    /// Text of a field. Null, missing and blank values are `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        let raw = match self.map.get(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!raw.is_empty()).then_some(raw)
    }

    pub fn required_text(&self, field: &str) -> Result<String, ValidationError> {
        self.text(field)
            .ok_or_else(|| ValidationError::RequiredFieldMissing {
                field: field.to_string(),
            })
    }

    pub fn text_or(&self, field: &str, default: &str) -> String {
        self.text(field).unwrap_or_else(|| default.to_string())
    }

    /// Parse an optional field with `FromStr`.
    pub fn parsed<T>(&self, field: &str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.text(field)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| ValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("{:?}: {}", raw, e),
                })
            })
            .transpose()
    }

    /// A non-negative whole number.
    pub fn required_count(&self, field: &str) -> Result<u32, ValidationError> {
        self.parsed::<u32>(field)?
            .ok_or_else(|| ValidationError::RequiredFieldMissing {
                field: field.to_string(),
            })
    }

    /// A finite, non-negative quantity, `None` when absent.
    pub fn quantity(&self, field: &str) -> Result<Option<f64>, ValidationError> {
        match self.parsed::<f64>(field)? {
            Some(value) if !value.is_finite() || value < 0.0 => {
                Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("{} is not a non-negative number", value),
                })
            }
            other => Ok(other),
        }
    }

    pub fn required_quantity(&self, field: &str) -> Result<f64, ValidationError> {
        self.quantity(field)?
            .ok_or_else(|| ValidationError::RequiredFieldMissing {
                field: field.to_string(),
            })
    }

    /// True only for a boolean `true` or the text "true" in any case.
    pub fn flag(&self, field: &str) -> bool {
        self.text(field)
            .is_some_and(|raw| raw.eq_ignore_ascii_case("true"))
    }
}
