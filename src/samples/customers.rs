//! Customer filters and first-order projections

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Customer, DataSource};
use crate::query::{aggregate, ContactRules, Query, QueryResult, SortSpec};

/// Company name and the month/year of its earliest order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstOrder {
    pub company_name: String,
    pub month: u32,
    pub year: i32,
}

/// `FirstOrder` plus the sum of all order totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstOrderSummary {
    pub company_name: String,
    pub month: u32,
    pub year: i32,
    pub total_sum: Decimal,
}

/// Customers whose order totals sum to more than `threshold`
///
/// Order totals are never negative, so a sum that overflows exceeds any
/// threshold.
pub fn customers_with_total_over<'a, D>(data: &'a D, threshold: Decimal) -> Query<'a, &'a Customer>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers())
        .filter(move |c| aggregate::sum(c.order_totals()).map_or(true, |total| total > threshold))
}

/// Customers with at least one order above `threshold`
pub fn customers_with_order_over<'a, D>(data: &'a D, threshold: Decimal) -> Query<'a, &'a Customer>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers())
        .filter(move |c| c.order_totals().any(|total| total > threshold))
}

/// Customers with orders, projected to the month and year of the first one
pub fn first_order_dates<'a, D>(data: &'a D) -> Query<'a, QueryResult<FirstOrder>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers())
        .filter(|c| c.has_orders())
        .map(|c| -> QueryResult<FirstOrder> {
            let first = first_order_date(c)?;
            Ok(FirstOrder {
                company_name: c.company_name.clone(),
                month: first.month(),
                year: first.year(),
            })
        })
}

/// First-order summaries ordered by year, month, total (descending) and name
pub fn first_order_summaries<'a, D>(data: &'a D) -> Query<'a, QueryResult<FirstOrderSummary>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers())
        .filter(|c| c.has_orders())
        .map(|c| -> QueryResult<FirstOrderSummary> {
            let first = first_order_date(c)?;
            Ok(FirstOrderSummary {
                company_name: c.company_name.clone(),
                month: first.month(),
                year: first.year(),
                total_sum: aggregate::sum(c.order_totals())
                    .map_err(|e| e.in_stage("first_order_summaries"))?,
            })
        })
        .sorted_ok(
            SortSpec::asc(|s: &FirstOrderSummary| s.year)
                .then_asc(|s| s.month)
                .then_desc(|s| s.total_sum)
                .then_asc(|s| s.company_name.clone()),
        )
}

/// Customers with a non-digit or blank postal code, a blank region, or a
/// phone without an operator code
pub fn incomplete_contacts<'a, D>(data: &'a D, rules: ContactRules) -> Query<'a, &'a Customer>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers()).filter(move |c| rules.is_incomplete(c))
}

fn first_order_date(customer: &Customer) -> QueryResult<NaiveDateTime> {
    aggregate::min(customer.order_dates()).map_err(|e| e.in_stage("first_order_date"))
}
