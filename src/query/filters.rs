//! Predicate primitives
//!
//! Null and blank string checks, regex matching, and the compiled contact
//! rules used to flag incomplete customer records. A missing value never
//! matches a pattern.

use regex::Regex;

use crate::config::{ConfigError, ContactConfig};
use crate::model::Customer;

/// True if the value is missing, empty or only whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// True if the value is present and matches `pattern`
pub fn matches_pattern(pattern: &Regex, value: Option<&str>) -> bool {
    value.map_or(false, |v| pattern.is_match(v))
}

/// True if the value is present and its first character is `prefix`
pub fn starts_with_char(value: Option<&str>, prefix: char) -> bool {
    value.and_then(|v| v.chars().next()) == Some(prefix)
}

/// Compiled rules for customer contact completeness
#[derive(Debug, Clone)]
pub struct ContactRules {
    postal_code: Regex,
    phone_operator_prefix: char,
}

impl ContactRules {
    /// Compiles the rules from configuration
    pub fn compile(config: &ContactConfig) -> Result<Self, ConfigError> {
        let postal_code = Regex::new(&config.postal_code_pattern).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: config.postal_code_pattern.clone(),
                source,
            }
        })?;

        Ok(Self {
            postal_code,
            phone_operator_prefix: config.phone_operator_prefix,
        })
    }

    /// Postal code is blank or does not match the configured format
    pub fn postal_code_invalid(&self, customer: &Customer) -> bool {
        let postal_code = customer.postal_code.as_deref();
        is_blank(postal_code) || !matches_pattern(&self.postal_code, postal_code)
    }

    /// Region is blank
    pub fn region_missing(&self, customer: &Customer) -> bool {
        is_blank(customer.region.as_deref())
    }

    /// Phone is blank or carries no operator code
    pub fn phone_incomplete(&self, customer: &Customer) -> bool {
        let phone = customer.phone.as_deref();
        is_blank(phone) || !starts_with_char(phone, self.phone_operator_prefix)
    }

    /// Any of the contact checks fails
    pub fn is_incomplete(&self, customer: &Customer) -> bool {
        self.postal_code_invalid(customer)
            || self.region_missing(customer)
            || self.phone_incomplete(customer)
    }
}
