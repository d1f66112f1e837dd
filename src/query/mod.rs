//! Query operators for relquery
//!
//! Composable operators over in-memory record collections:
//!
//! 1. Filter and project (`Query::filter`, `Query::map`)
//! 2. Group by key, any number of levels (`group`)
//! 3. Equi-join, correlated or grouped (`join`)
//! 4. Stable multi-key sort (`sorter`)
//! 5. Aggregate reduction (`aggregate`)
//!
//! # Invariants
//!
//! - Building a pipeline does no work; enumerating it re-runs every stage
//! - Groups keep first-occurrence order, members keep source order
//! - Sorting is stable
//! - average/min/max fail on empty input, sum/count return zero
//! - sums never wrap: overflow is a `NumericOverflow` error

pub mod aggregate;
mod errors;
mod filters;
mod group;
mod join;
mod key;
mod pipeline;
mod sorter;

pub use errors::{AggregateFunction, QueryError, QueryResult};
pub use filters::{is_blank, matches_pattern, starts_with_char, ContactRules};
pub use group::{group_by, try_group_by, Grouping};
pub use join::{group_join, partition, try_group_join, Correlated, GroupJoined};
pub use key::{CompositeKey, KeyKind, KeyPart, KeyShape};
pub use pipeline::Query;
pub use sorter::{order_by, SortDirection, SortSpec};
