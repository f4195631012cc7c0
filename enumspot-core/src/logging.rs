//! Structured logging using **tracing**.
//!
//! Library code emits events through the `tracing` macros directly; binaries
//! install the JSON subscriber once at startup. Output goes to stderr so
//! stdout stays reserved for reports.

/// Initializes the global tracing subscriber.
///
/// Call once at the beginning of the program. A second call is ignored.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=enumspot_core=debug`)
pub fn init_structured_logging() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

