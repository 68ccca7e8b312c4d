use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`. Calling this more than once is a
/// no-op, so the embedding service and tests can both call it.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}
