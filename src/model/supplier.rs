//! Supplier records

use serde::Serialize;

/// A supplier located in a city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supplier {
    pub supplier_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl Supplier {
    pub fn new(
        supplier_name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            supplier_name: supplier_name.into(),
            address: String::new(),
            city: city.into(),
            country: country.into(),
        }
    }

    /// The (city, country) pair suppliers are matched on
    pub fn location_key(&self) -> (String, String) {
        (self.city.clone(), self.country.clone())
    }
}
