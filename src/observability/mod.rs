//! Observability for relquery
//!
//! Operators emit `tracing` events (stage evaluation at TRACE, aggregate and
//! key faults at DEBUG). This module installs the subscriber that renders
//! them.
//!
//! # Principles
//!
//! 1. Observability is read-only: no effect on query results
//! 2. One log line = one event
//! 3. Synchronous, no background threads
//!
//! # Usage
//!
//! ```ignore
//! use relquery::{config::LoggingConfig, observability};
//!
//! observability::init_logging(&LoggingConfig::default())?;
//! ```

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, ConfigResult, LoggingConfig};

/// Subscriber type produced by `build_subscriber`
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Builds a subscriber writing to `make_writer`
///
/// The filter comes from `config.filter`, or from `env_override` when one is
/// given and non-blank.
pub fn build_subscriber<W>(
    config: &LoggingConfig,
    env_override: Option<&str>,
    make_writer: W,
) -> ConfigResult<BoxedSubscriber>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = build_filter(&config.filter, env_override)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer);

    if config.json {
        Ok(Box::new(builder.json().finish()))
    } else {
        Ok(Box::new(builder.finish()))
    }
}

/// Installs the global subscriber, writing to stderr
///
/// `RUST_LOG` overrides the configured filter. Returns false if a global
/// subscriber was already installed; the existing one is kept.
pub fn init_logging(config: &LoggingConfig) -> ConfigResult<bool> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = build_subscriber(config, env.as_deref(), std::io::stderr)?;
    Ok(tracing::subscriber::set_global_default(subscriber).is_ok())
}

fn build_filter(directive: &str, env_override: Option<&str>) -> ConfigResult<EnvFilter> {
    match env_override {
        Some(env) if !env.trim().is_empty() => parse_filter(env),
        _ => parse_filter(directive),
    }
}

/// Parses an `EnvFilter` directive
pub(crate) fn parse_filter(directive: &str) -> ConfigResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| ConfigError::InvalidLogFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}
