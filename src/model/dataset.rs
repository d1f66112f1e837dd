//! Input boundary for queries
//!
//! A `DataSource` exposes already-populated, read-only entity collections.
//! How they were loaded is not the query layer's concern.

use super::{Customer, Product, Supplier};

/// Read-only access to the entity collections
pub trait DataSource {
    /// All customers, each owning its orders
    fn customers(&self) -> &[Customer];

    /// All products
    fn products(&self) -> &[Product];

    /// All suppliers
    fn suppliers(&self) -> &[Supplier];
}

/// Owned, in-memory data source
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    customers: Vec<Customer>,
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
}

impl Dataset {
    /// Creates a dataset from fully populated collections
    pub fn new(customers: Vec<Customer>, products: Vec<Product>, suppliers: Vec<Supplier>) -> Self {
        Self {
            customers,
            products,
            suppliers,
        }
    }

    /// Creates an empty dataset
    pub fn empty() -> Self {
        Self::default()
    }
}

impl DataSource for Dataset {
    fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn products(&self) -> &[Product] {
        &self.products
    }

    fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }
}
