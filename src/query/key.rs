//! Composite keys with runtime shape checks
//!
//! Statically typed keys (`(String, String)`, `u32`, ...) cannot be malformed.
//! `CompositeKey` is the dynamic form used when a key is assembled from
//! heterogeneous fields at runtime. Every key in one grouping or join must
//! have the same arity and the same kind in each component, otherwise the
//! operation fails at the first offending element.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use super::errors::{QueryError, QueryResult};

/// One component of a composite key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum KeyPart {
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDateTime),
}

/// Kind of a non-null key component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Integer,
    Decimal,
    Date,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Text => "text",
            KeyKind::Integer => "integer",
            KeyKind::Decimal => "decimal",
            KeyKind::Date => "date",
        }
    }
}

impl KeyPart {
    /// Kind of this component; `None` for null
    pub fn kind(&self) -> Option<KeyKind> {
        match self {
            KeyPart::Null => None,
            KeyPart::Text(_) => Some(KeyKind::Text),
            KeyPart::Integer(_) => Some(KeyKind::Integer),
            KeyPart::Decimal(_) => Some(KeyKind::Decimal),
            KeyPart::Date(_) => Some(KeyKind::Date),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Null => f.write_str("null"),
            KeyPart::Text(s) => write!(f, "{:?}", s),
            KeyPart::Integer(i) => write!(f, "{}", i),
            KeyPart::Decimal(d) => write!(f, "{}", d),
            KeyPart::Date(d) => write!(f, "{}", d),
        }
    }
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        KeyPart::Text(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        KeyPart::Text(value)
    }
}

impl From<Option<&str>> for KeyPart {
    fn from(value: Option<&str>) -> Self {
        value.map(KeyPart::from).unwrap_or(KeyPart::Null)
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        KeyPart::Integer(value)
    }
}

impl From<u32> for KeyPart {
    fn from(value: u32) -> Self {
        KeyPart::Integer(i64::from(value))
    }
}

impl From<i32> for KeyPart {
    fn from(value: i32) -> Self {
        KeyPart::Integer(i64::from(value))
    }
}

impl From<Decimal> for KeyPart {
    fn from(value: Decimal) -> Self {
        KeyPart::Decimal(value)
    }
}

impl From<NaiveDateTime> for KeyPart {
    fn from(value: NaiveDateTime) -> Self {
        KeyPart::Date(value)
    }
}

/// Ordered tuple of key components compared component-wise
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CompositeKey(Vec<KeyPart>);

impl CompositeKey {
    pub fn new(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", part)?;
        }
        f.write_str(")")
    }
}

/// Builds a `CompositeKey` from heterogeneous values
///
/// ```ignore
/// let key = composite_key!(customer.city.as_str(), customer.country.as_str());
/// ```
#[macro_export]
macro_rules! composite_key {
    ($($part:expr),* $(,)?) => {
        $crate::query::CompositeKey::new(vec![$($crate::query::KeyPart::from($part)),*])
    };
}

/// Expected shape of every key in one operation
///
/// The shape is fixed by the first key observed. Null components never fix
/// or violate a kind.
#[derive(Debug, Default)]
pub struct KeyShape {
    kinds: Option<Vec<Option<KeyKind>>>,
}

impl KeyShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a key against the shape, learning kinds from it as it goes
    pub fn check(&mut self, stage: &str, key: &CompositeKey) -> QueryResult<()> {
        let Some(kinds) = self.kinds.as_mut() else {
            self.kinds = Some(key.parts().iter().map(KeyPart::kind).collect());
            return Ok(());
        };

        if kinds.len() != key.arity() {
            return Err(QueryError::malformed_key(
                stage,
                key.to_string(),
                format!("arity {}, expected {}", key.arity(), kinds.len()),
            ));
        }

        for (i, (expected, part)) in kinds.iter_mut().zip(key.parts()).enumerate() {
            match (*expected, part.kind()) {
                (_, None) => {}
                (None, found) => *expected = found,
                (Some(want), Some(found)) if want != found => {
                    return Err(QueryError::malformed_key(
                        stage,
                        key.to_string(),
                        format!(
                            "component {} is {}, expected {}",
                            i,
                            found.as_str(),
                            want.as_str()
                        ),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
