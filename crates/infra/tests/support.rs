//! Shared helpers for the infra integration suites.

#![allow(dead_code)]

use compliance_domain::ClientConfig;
use compliance_infra::config;
use once_cell::sync::Lazy;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
});

/// Install the test subscriber once per test binary.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Configuration for the live suite, if the environment provides one.
///
/// Looks at `COMPLIANCE_CONFIG_FILE` first, then the `COMPLIANCE_*`
/// variables.
pub fn live_config() -> Option<ClientConfig> {
    if let Ok(path) = std::env::var(config::CONFIG_FILE_ENV) {
        return config::load_from_file(Some(path.into())).ok();
    }
    config::load_from_env().ok()
}
