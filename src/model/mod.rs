//! Entity model for relquery
//!
//! Static record shapes the query operators run over:
//! - `Customer` owns an ordered sequence of `Order`
//! - `Product` and `Supplier` are independent collections
//!
//! Entities are populated once by a `DataSource` and never mutated by a
//! query. Every query borrows them for its lifetime.

mod customer;
mod dataset;
mod product;
mod supplier;

pub use customer::{Customer, Order};
pub use dataset::{DataSource, Dataset};
pub use product::Product;
pub use supplier::Supplier;
