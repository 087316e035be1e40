//! Opt-in log subscriber for hosts embedding the scorer.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,qrshield_core=debug";

/// Install a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// Returns false when a global subscriber is already installed; the existing one is kept.
pub fn init_logging_stderr() -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let _ = init_logging_stderr();
        assert!(!init_logging_stderr());
        tracing::debug!("logging initialized for tests");
    }
}
