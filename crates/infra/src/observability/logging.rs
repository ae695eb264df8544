//! Tracing subscriber setup

use stockdesk_domain::{LoggingConfig, Result, StockDeskError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter for the subscriber: `RUST_LOG` wins over the configured level.
///
/// # Errors
/// `StockDeskError::Config` when the configured level is not a valid filter
/// directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(config.level.trim()).map_err(|e| {
            StockDeskError::Config(format!("invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
/// `StockDeskError::Config` when the level is invalid or a global subscriber
/// is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed
        .map_err(|e| StockDeskError::Config(format!("tracing subscriber already set: {}", e)))?;
    tracing::debug!(level = %config.level, json = config.json, "tracing.initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig { level: "info,stockdesk=loud".into(), json: false };
        assert!(matches!(build_filter(&config), Err(StockDeskError::Config(_))));
    }

    #[test]
    fn second_init_reports_an_error() {
        let config = LoggingConfig::default();
        // The first call may lose to another test; the second always finds one installed
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(StockDeskError::Config(_))));
    }
}
