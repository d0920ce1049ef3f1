use tracing_subscriber::EnvFilter;

/// Route diagnostics to stderr so stdout stays reserved for reports and trees.
pub fn init() {
    let filter = EnvFilter::try_from_env("ROLLUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
