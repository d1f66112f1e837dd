//! relquery - Composable, lazy, deterministic queries over an in-memory
//! relational dataset
//!
//! - `model`: customers (owning their orders), products, suppliers
//! - `query`: filter, project, group, join, sort and aggregate operators
//! - `samples`: the concrete query pipelines built from those operators

pub mod config;
pub mod model;
pub mod observability;
pub mod query;
pub mod samples;
