//! Product records

use rust_decimal::Decimal;
use serde::Serialize;

/// A catalogue product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: u32,
    pub product_name: String,
    pub category: String,
    pub units_in_stock: u32,
    pub unit_price: Decimal,
}

impl Product {
    pub fn new(
        product_id: u32,
        product_name: impl Into<String>,
        category: impl Into<String>,
        units_in_stock: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            category: category.into(),
            units_in_stock,
            unit_price,
        }
    }
}
