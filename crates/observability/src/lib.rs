//! Tracing and logging setup shared by every entry point.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide logging with `default_filter` unless `RUST_LOG`
/// is set.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}
