//! Metrics collection.
//!
//! # Metrics
//! - `conformance_queries_total` (counter): queries by outcome
//! - `conformance_connectivity_attempts_total` (counter): connectivity probes
//! - `conformance_config_polls_total` (counter): introspection polls
//! - `conformance_config_mismatches_total` (counter): failed comparisons
//! - `conformance_confirmed_writes_total` (counter): ledger increments by target

use ::metrics::counter;

pub fn record_query(success: bool) {
    let outcome = if success { "success" } else { "error" };
    counter!("conformance_queries_total", "outcome" => outcome).increment(1);
}

pub fn record_connectivity_attempt() {
    counter!("conformance_connectivity_attempts_total").increment(1);
}

pub fn record_config_poll() {
    counter!("conformance_config_polls_total").increment(1);
}

pub fn record_config_mismatch() {
    counter!("conformance_config_mismatches_total").increment(1);
}

pub fn record_confirmed_write(target: &str) {
    counter!("conformance_confirmed_writes_total", "target" => target.to_string()).increment(1);
}
