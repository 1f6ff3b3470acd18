//! Harness settings validation.
//!
//! Semantic checks run after serde has accepted the file. Every problem is
//! collected so a broken settings file is fixed in one pass.

use std::fmt;

use url::Url;

use crate::config::schema::HarnessConfig;

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate harness settings.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let connection = &config.connection;
    if Url::parse(&format!("{}://{}", connection.scheme, connection.host)).is_err() {
        errors.push(ValidationError::new(
            "connection",
            format!(
                "'{}://{}' is not a valid URI",
                connection.scheme, connection.host
            ),
        ));
    }
    if connection.user.is_empty() {
        errors.push(ValidationError::new("connection.user", "must not be empty"));
    }
    if connection.database.is_empty() {
        errors.push(ValidationError::new("connection.database", "must not be empty"));
    }

    if config.connectivity.timeout_secs == 0 {
        errors.push(ValidationError::new("connectivity.timeout_secs", "must be > 0"));
    }
    if config.connectivity.retry_delay_secs > config.connectivity.timeout_secs {
        errors.push(ValidationError::new(
            "connectivity.retry_delay_secs",
            "must not exceed connectivity.timeout_secs",
        ));
    }
    if config.reconcile.timeout_secs == 0 {
        errors.push(ValidationError::new("reconcile.timeout_secs", "must be > 0"));
    }

    if config.overrides.0.keys().any(|key| key.trim().is_empty()) {
        errors.push(ValidationError::new("overrides", "keys must not be blank"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&HarnessConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = HarnessConfig::default();
        config.connection.user.clear();
        config.connectivity.timeout_secs = 0;
        config.reconcile.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"connection.user"));
        assert!(fields.contains(&"connectivity.timeout_secs"));
        assert!(fields.contains(&"connectivity.retry_delay_secs"));
        assert!(fields.contains(&"reconcile.timeout_secs"));
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let mut config = HarnessConfig::default();
        config.connection.scheme = "bolt s".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "connection");
    }
}
