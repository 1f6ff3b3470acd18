//! Query parameters and result rows.

use serde_json::{Map, Value};
use thiserror::Error;

/// Named query parameters (`$id`, `$name`, ...).
pub type Params = Map<String, Value>;

/// Errors raised when decoding a field out of a [`Record`].
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// The row has no field with this name.
    #[error("record is missing field '{0}'")]
    MissingField(String),

    /// The field exists but holds a different type.
    #[error("field '{field}' is not a {expected}: {actual}")]
    WrongType {
        field: String,
        expected: &'static str,
        actual: Value,
    },
}

/// A single result row, fields kept in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Raw access to a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, field: &str) -> Result<&str, RecordError> {
        let value = self.require(field)?;
        value.as_str().ok_or_else(|| RecordError::WrongType {
            field: field.to_string(),
            expected: "string",
            actual: value.clone(),
        })
    }

    pub fn get_i64(&self, field: &str) -> Result<i64, RecordError> {
        let value = self.require(field)?;
        value.as_i64().ok_or_else(|| RecordError::WrongType {
            field: field.to_string(),
            expected: "integer",
            actual: value.clone(),
        })
    }

    fn require(&self, field: &str) -> Result<&Value, RecordError> {
        self.get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }
}
