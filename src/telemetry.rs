use tracing_subscriber::EnvFilter;

/// fmt subscriber filtered by `RUST_LOG`, `info` when unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
