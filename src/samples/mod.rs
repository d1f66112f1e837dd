//! Sample queries over the customer/product/supplier dataset
//!
//! Each function builds a lazy `Query` over a `DataSource`. Nothing runs
//! until the query is enumerated. `SampleQueries` binds a data source to a
//! `QueryConfig` so thresholds and rules come from configuration.

mod customers;
mod products;
mod statistics;
mod suppliers;

pub use customers::{
    customers_with_order_over, customers_with_total_over, first_order_dates,
    first_order_summaries, incomplete_contacts, FirstOrder, FirstOrderSummary,
};
pub use products::{
    products_by_category_and_stock, products_by_price_tier, CategoryStock, PriceTier,
    PriceTierGroup, StockLevel,
};
pub use statistics::{
    city_statistics, monthly_activity, year_month_activity, yearly_activity, CityStatistics,
    CustomerMonthlyActivity, CustomerYearMonthActivity, CustomerYearlyActivity, MonthActivity,
    MonthCount, YearActivity, YearMonths,
};
pub use suppliers::{suppliers_by_location, suppliers_by_location_grouped};

use crate::config::{ConfigResult, QueryConfig};
use crate::model::{Customer, DataSource, Supplier};
use crate::query::{ContactRules, Correlated, GroupJoined, Query, QueryResult};

/// A data source bound to its query configuration
pub struct SampleQueries<'a> {
    data: &'a dyn DataSource,
    config: QueryConfig,
    contact_rules: ContactRules,
}

impl<'a> SampleQueries<'a> {
    /// Validates the configuration and compiles its rules
    pub fn new(data: &'a dyn DataSource, config: QueryConfig) -> ConfigResult<Self> {
        let contact_rules = config.compile_rules()?;
        Ok(Self {
            data,
            config,
            contact_rules,
        })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn large_total_customers(&self) -> Query<'a, &'a Customer> {
        customers_with_total_over(self.data, self.config.order_total_threshold)
    }

    pub fn suppliers_by_location(&self) -> Query<'a, Correlated<'a, &'a Customer, &'a Supplier>> {
        suppliers_by_location(self.data)
    }

    pub fn suppliers_by_location_grouped(&self) -> Query<'a, GroupJoined<&'a Customer, &'a Supplier>> {
        suppliers_by_location_grouped(self.data)
    }

    pub fn large_order_customers(&self) -> Query<'a, &'a Customer> {
        customers_with_order_over(self.data, self.config.single_order_threshold)
    }

    pub fn first_order_dates(&self) -> Query<'a, QueryResult<FirstOrder>> {
        first_order_dates(self.data)
    }

    pub fn first_order_summaries(&self) -> Query<'a, QueryResult<FirstOrderSummary>> {
        first_order_summaries(self.data)
    }

    pub fn incomplete_contacts(&self) -> Query<'a, &'a Customer> {
        incomplete_contacts(self.data, self.contact_rules.clone())
    }

    pub fn products_by_category_and_stock(&self) -> Query<'a, CategoryStock<'a>> {
        products_by_category_and_stock(self.data)
    }

    pub fn products_by_price_tier(&self) -> Query<'a, PriceTierGroup<'a>> {
        products_by_price_tier(self.data, self.config.price_tiers.clone())
    }

    pub fn city_statistics(&self) -> Query<'a, QueryResult<CityStatistics>> {
        city_statistics(self.data)
    }

    pub fn monthly_activity(&self) -> Query<'a, CustomerMonthlyActivity> {
        monthly_activity(self.data)
    }

    pub fn yearly_activity(&self) -> Query<'a, CustomerYearlyActivity> {
        yearly_activity(self.data)
    }

    pub fn year_month_activity(&self) -> Query<'a, CustomerYearMonthActivity> {
        year_month_activity(self.data)
    }
}
