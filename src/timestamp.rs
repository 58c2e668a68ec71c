//! Optional message-timestamp extraction.
//!
//! When enabled, a numeric `"timestamp"` member at the document root
//! overrides the caller-supplied default. Absence or a wrong type silently
//! falls back — this is policy, not an error.

use crate::config::ParserConfig;
use crate::value::Value;

/// Root-level member name checked when `use_message_timestamp` is set.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Pick the timestamp for every sample of one message. Never fails.
pub fn extract_timestamp(doc: &Value, config: &ParserConfig, fallback: f64) -> f64 {
    if !config.use_message_timestamp {
        return fallback;
    }
    doc.get(TIMESTAMP_FIELD)
        .and_then(Value::as_f64)
        .unwrap_or(fallback)
}
