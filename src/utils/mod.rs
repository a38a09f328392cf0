//! Utility helpers shared across the simulation.

pub mod format;
pub mod time;

pub use format::*;
pub use time::*;

use tracing_subscriber::EnvFilter;

/// Initialize tracing output for the binary.
///
/// Honors `RUST_LOG` when set, defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}
