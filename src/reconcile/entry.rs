//! Typed introspection rows.

use crate::client::{Record, RecordError};

/// One `(name, value)` row of `dbms.listConfig()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
}

impl TryFrom<&Record> for ConfigEntry {
    type Error = RecordError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            name: record.get_str("name")?.to_string(),
            value: record.get_str("value")?.to_string(),
        })
    }
}
