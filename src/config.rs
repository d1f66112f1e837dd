//! Query configuration
//!
//! Thresholds, price tiers, contact rules and logging settings. Every field
//! has a default, so an empty JSON object is a complete configuration.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability;
use crate::query::ContactRules;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid price tiers: cheap_below {cheap_below} exceeds expensive_above {expensive_above}")]
    InvalidPriceTiers {
        cheap_below: Decimal,
        expensive_above: Decimal,
    },

    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO",
            ConfigError::Parse(_) => "CONFIG_PARSE",
            ConfigError::InvalidPattern { .. } => "CONFIG_INVALID_PATTERN",
            ConfigError::InvalidPriceTiers { .. } => "CONFIG_INVALID_PRICE_TIERS",
            ConfigError::InvalidLogFilter { .. } => "CONFIG_INVALID_LOG_FILTER",
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Price bounds separating cheap, average and expensive products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTierConfig {
    /// Strictly below this is cheap (default: 10)
    #[serde(default = "default_cheap_below")]
    pub cheap_below: Decimal,

    /// Strictly above this is expensive (default: 60)
    #[serde(default = "default_expensive_above")]
    pub expensive_above: Decimal,
}

fn default_cheap_below() -> Decimal {
    Decimal::from(10)
}

fn default_expensive_above() -> Decimal {
    Decimal::from(60)
}

impl Default for PriceTierConfig {
    fn default() -> Self {
        Self {
            cheap_below: default_cheap_below(),
            expensive_above: default_expensive_above(),
        }
    }
}

/// Contact completeness rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Postal codes must match this pattern (default: digits only)
    #[serde(default = "default_postal_code_pattern")]
    pub postal_code_pattern: String,

    /// Phones with an operator code start with this (default: '(')
    #[serde(default = "default_phone_operator_prefix")]
    pub phone_operator_prefix: char,
}

fn default_postal_code_pattern() -> String {
    r"^\d+$".to_string()
}

fn default_phone_operator_prefix() -> char {
    '('
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            postal_code_pattern: default_postal_code_pattern(),
            phone_operator_prefix: default_phone_operator_prefix(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (default: "info"); `RUST_LOG` overrides it
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of plain text (default: false)
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Customers whose orders sum above this qualify (default: 104000)
    #[serde(default = "default_order_total_threshold")]
    pub order_total_threshold: Decimal,

    /// Customers with any single order above this qualify (default: 15000)
    #[serde(default = "default_single_order_threshold")]
    pub single_order_threshold: Decimal,

    #[serde(default)]
    pub price_tiers: PriceTierConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_order_total_threshold() -> Decimal {
    Decimal::from(104_000)
}

fn default_single_order_threshold() -> Decimal {
    Decimal::from(15_000)
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            order_total_threshold: default_order_total_threshold(),
            single_order_threshold: default_single_order_threshold(),
            price_tiers: PriceTierConfig::default(),
            contact: ContactConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl QueryConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: QueryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "query config loaded");
        Ok(config)
    }

    /// Checks price tiers, the log filter and the contact rules
    pub fn validate(&self) -> ConfigResult<()> {
        self.compile_rules().map(|_| ())
    }

    /// Validates the configuration and returns its compiled contact rules
    pub fn compile_rules(&self) -> ConfigResult<ContactRules> {
        if self.price_tiers.cheap_below > self.price_tiers.expensive_above {
            return Err(ConfigError::InvalidPriceTiers {
                cheap_below: self.price_tiers.cheap_below,
                expensive_above: self.price_tiers.expensive_above,
            });
        }

        observability::parse_filter(&self.logging.filter)?;
        ContactRules::compile(&self.contact)
    }
}
