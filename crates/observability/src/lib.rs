//! Process-wide logging setup shared by the service binaries.

/// Initialize structured logging for the process.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. the service's
/// `LOG_LEVEL`) is used. Safe to call multiple times; later calls are no-ops.
pub fn init(default_level: &str) {
    tracing::init(default_level);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
