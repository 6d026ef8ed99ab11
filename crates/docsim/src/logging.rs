//! Tracing subscriber setup for embedders and tests.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber with an env-derived filter
/// (`RUST_LOG`, default `info`) and routes `log` macro call sites into
/// it.
///
/// Returns quietly if a subscriber is already installed, so tests and
/// embedders can call it more than once. Library code never calls this
/// implicitly.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Route `log` macro call sites (store, client) through tracing.
    let _ = tracing_log::LogTracer::init();

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_init_is_idempotent() {
        super::init();
        super::init();
    }
}
