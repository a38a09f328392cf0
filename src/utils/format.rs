//! Formatting helpers for rendering chain state in the terminal.

use chrono::{TimeZone, Utc};

/// Shorten a hex digest for display (first 15 characters, as the inspector
/// shows them).
pub fn short_hash(hash: &str) -> String {
    if hash.len() > 15 {
        format!("{}...", &hash[..15])
    } else {
        hash.to_string()
    }
}

/// Render a millisecond Unix timestamp as a UTC datetime.
pub fn format_timestamp(millis: u64) -> String {
    match Utc.timestamp_millis_opt(millis as i64).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => format!("{} ms", millis),
    }
}

/// Render a duration in seconds the way mining times are reported.
pub fn format_duration(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}
