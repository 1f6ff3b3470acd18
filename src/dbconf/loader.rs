//! Loading `neo4j.conf` style files.

use std::fs;
use std::path::Path;

use ini::{Ini, ParseOption};
use thiserror::Error;

use crate::dbconf::model::{DbmsConfiguration, JVM_ADDITIONAL_KEY};

/// Error type for loading an expected configuration.
#[derive(Debug, Error)]
pub enum DbConfError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("configuration does not declare '{0}'")]
    MissingKey(&'static str),
}

impl DbmsConfiguration {
    /// Load the expected configuration from a file on disk.
    pub fn load(path: &Path) -> Result<Self, DbConfError> {
        let content = fs::read_to_string(path).map_err(|source| DbConfError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;

        tracing::debug!(
            path = %path.display(),
            entries = config.entries.len(),
            jvm_args = config.jvm_additional.len(),
            "Loaded expected configuration"
        );
        Ok(config)
    }

    /// Parse configuration text.
    ///
    /// Keys outside any `[section]` are read. Every declaration of
    /// `dbms.jvm.additional` is kept in order; for other keys the first one wins.
    pub fn parse(content: &str) -> Result<Self, DbConfError> {
        // Backslashes are literal in neo4j.conf (e.g. Windows paths in JVM args).
        let options = ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, options)?;

        let mut config = DbmsConfiguration::new();
        if let Some(section) = ini.section(None::<String>) {
            for (key, value) in section.iter() {
                if key == JVM_ADDITIONAL_KEY {
                    config.jvm_additional.push(value.to_string());
                } else {
                    config
                        .entries
                        .entry(key.to_string())
                        .or_insert_with(|| value.to_string());
                }
            }
        }

        if config.jvm_additional.is_empty() {
            return Err(DbConfError::MissingKey(JVM_ADDITIONAL_KEY));
        }
        Ok(config)
    }
}
