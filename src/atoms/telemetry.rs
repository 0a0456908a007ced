use tracing_subscriber::EnvFilter;

use crate::types::GeneralConfig;

/// Installs a fmt subscriber. `RUST_LOG` takes precedence over `default_level`.
/// Returns false if a global subscriber was already set.
pub fn init_tracing(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// [`init_tracing`] at the level named by `[general] log_level`.
pub fn init_from_config(general: &GeneralConfig) -> bool {
    init_tracing(&general.log_level)
}
