//! Logging setup for Verso.
//!
//! Built on the `tracing` ecosystem. The presentation layer only needs a
//! console subscriber; messages are filtered through the `RUST_LOG`
//! environment variable with an "info" default.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests, demos, and early application startup. Filters messages
/// based on the `RUST_LOG` environment variable, defaulting to "info" if it
/// is not set or invalid. Errors during initialization (e.g., if a global
/// subscriber is already set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}
