//! Outcome of a configuration check.
//!
//! Each comparison is recorded here instead of aborting, so one run
//! reports every disagreement on a target.

use std::fmt;

use crate::client::TargetId;
use crate::observability::metrics;

/// One value that disagreed with the expected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub key: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.key, self.expected, self.actual
        )
    }
}

/// Comparisons performed against one target.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub target: TargetId,
    /// Number of comparisons made.
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl CheckReport {
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            checked: 0,
            mismatches: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Case-insensitive comparison of a scalar setting.
    pub fn check_scalar(&mut self, key: &str, expected: &str, actual: &str) -> bool {
        self.checked += 1;
        if expected.to_lowercase() == actual.to_lowercase() {
            return true;
        }
        self.fail(Mismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
        false
    }

    /// Exact, order-sensitive comparison of a multi-valued setting.
    pub fn check_sequence(&mut self, key: &str, expected: &[String], actual: &[&str]) -> bool {
        self.checked += 1;
        let equal = expected.len() == actual.len()
            && expected.iter().zip(actual).all(|(e, a)| e == a);
        if equal {
            return true;
        }
        self.fail(Mismatch {
            key: key.to_string(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        });
        false
    }

    fn fail(&mut self, mismatch: Mismatch) {
        metrics::record_config_mismatch();
        tracing::error!(
            target_id = %self.target,
            key = %mismatch.key,
            expected = %mismatch.expected,
            actual = %mismatch.actual,
            "Expected runtime config to match provided value"
        );
        self.mismatches.push(mismatch);
    }
}
