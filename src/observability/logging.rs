//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Pick the output format for the environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured log level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, Settings};

/// Format used when none is configured explicitly.
pub fn effective_format(settings: &Settings) -> LogFormat {
    settings.observability.log_format.unwrap_or(if settings.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })
}

/// Default filter directives when `RUST_LOG` is unset.
pub fn default_directives(settings: &Settings) -> String {
    let level = &settings.observability.log_level;
    format!("differetmix_api={level},tower_http={level},mongodb=warn")
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(settings).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match effective_format(settings) {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if result.is_ok() {
        tracing::debug!(format = ?effective_format(settings), "Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_follows_environment() {
        let mut settings = Settings::default();
        assert_eq!(effective_format(&settings), LogFormat::Pretty);

        settings.environment = "Production".into();
        assert_eq!(effective_format(&settings), LogFormat::Json);

        settings.observability.log_format = Some(LogFormat::Pretty);
        assert_eq!(effective_format(&settings), LogFormat::Pretty);
    }

    #[test]
    fn test_directives_use_level() {
        let mut settings = Settings::default();
        settings.observability.log_level = "debug".into();
        assert!(default_directives(&settings).starts_with("differetmix_api=debug"));
    }
}
