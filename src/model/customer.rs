//! Customer and order records

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// A single order placed by a customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Order identifier
    pub order_id: u32,
    /// When the order was placed
    pub order_date: NaiveDateTime,
    /// Monetary total, never negative
    pub total: Decimal,
}

impl Order {
    /// Creates a new order
    pub fn new(order_id: u32, order_date: NaiveDateTime, total: Decimal) -> Self {
        Self {
            order_id,
            order_date,
            total,
        }
    }

    /// Calendar month of the order date (1-12)
    pub fn month(&self) -> u32 {
        self.order_date.month()
    }

    /// Calendar year of the order date
    pub fn year(&self) -> i32 {
        self.order_date.year()
    }
}

/// A customer and the orders it exclusively owns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub customer_id: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    /// Orders in placement order. Empty means "no orders".
    pub orders: Vec<Order>,
}

impl Customer {
    /// Creates a customer with no contact details and no orders
    pub fn new(
        customer_id: impl Into<String>,
        company_name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            company_name: company_name.into(),
            address: String::new(),
            city: city.into(),
            country: country.into(),
            region: None,
            postal_code: None,
            phone: None,
            orders: Vec::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    /// Returns true if the customer has placed at least one order
    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }

    /// The (city, country) pair customers are matched to suppliers on
    pub fn location_key(&self) -> (String, String) {
        (self.city.clone(), self.country.clone())
    }

    /// Order totals in placement order
    pub fn order_totals(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.orders.iter().map(|order| order.total)
    }

    /// Order dates in placement order
    pub fn order_dates(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.orders.iter().map(|order| order.order_date)
    }
}
