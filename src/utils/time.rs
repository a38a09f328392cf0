//! Time helpers for the timestamps recorded on transactions and blocks.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in milliseconds.
pub fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_nonzero() {
        assert!(current_timestamp_millis() > 0);
    }

    #[test]
    fn test_timestamp_does_not_go_backwards() {
        let a = current_timestamp_millis();
        let b = current_timestamp_millis();
        assert!(b >= a);
    }
}
