use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber
///
/// The filter comes from `RUST_LOG` (for example `RUST_LOG=volunteer_roster=debug`
/// to see every assignment decision) and defaults to `info`. Logs go to stderr
/// so roster output on stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Subscriber for tests, safe to call more than once
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
