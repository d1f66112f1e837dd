//! Per-city and per-customer order statistics

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Customer, DataSource};
use crate::query::{aggregate, group_by, Grouping, Query, QueryResult};

/// Order statistics of the customers in one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStatistics {
    pub city: String,
    /// Sum over customers of each customer's average order total.
    ///
    /// This is not the average order total of the city: the per-customer
    /// averages are added, not averaged.
    pub sum_of_average_totals: Decimal,
    /// Mean number of orders per customer
    pub average_order_count: f64,
}

/// Orders placed in one calendar month, per year the month occurs in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthActivity {
    pub month: u32,
    pub activity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerMonthlyActivity {
    pub company_name: String,
    pub months: Vec<MonthActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearActivity {
    pub year: i32,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerYearlyActivity {
    pub company_name: String,
    pub years: Vec<YearActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: u32,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearMonths {
    pub year: i32,
    pub months: Vec<MonthCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerYearMonthActivity {
    pub company_name: String,
    pub years: Vec<YearMonths>,
}

/// Customers with orders grouped by city, with per-city order statistics
///
/// Each city row is computed independently; a failure in one city does not
/// affect the others.
pub fn city_statistics<'a, D>(data: &'a D) -> Query<'a, QueryResult<CityStatistics>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers())
        .filter(|c| c.has_orders())
        .group_by(|c| c.city.clone())
        .map(|city| city_row(&city).map_err(|e| e.in_stage("city_statistics")))
}

fn city_row(city: &Grouping<String, &Customer>) -> QueryResult<CityStatistics> {
    let averages = city
        .iter()
        .map(|c| aggregate::average(c.order_totals()))
        .collect::<QueryResult<Vec<Decimal>>>()?;

    Ok(CityStatistics {
        city: city.key().clone(),
        sum_of_average_totals: aggregate::sum(averages)?,
        average_order_count: aggregate::average(city.iter().map(|c| c.orders.len()))?,
    })
}

/// Per customer and calendar month: orders in that month divided by the
/// number of distinct years they were placed in
pub fn monthly_activity<'a, D>(data: &'a D) -> Query<'a, CustomerMonthlyActivity>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers()).map(|c| CustomerMonthlyActivity {
        company_name: c.company_name.clone(),
        months: group_by(&c.orders, |o| o.month())
            .into_iter()
            .map(|month| {
                let years = aggregate::count(group_by(month.iter(), |o| o.year()));
                MonthActivity {
                    month: *month.key(),
                    activity: aggregate::count(month.iter()) as f64 / years as f64,
                }
            })
            .collect(),
    })
}

/// Per customer: number of orders in each year
pub fn yearly_activity<'a, D>(data: &'a D) -> Query<'a, CustomerYearlyActivity>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers()).map(|c| CustomerYearlyActivity {
        company_name: c.company_name.clone(),
        years: group_by(&c.orders, |o| o.year())
            .into_iter()
            .map(|year| YearActivity {
                year: *year.key(),
                orders: year.len(),
            })
            .collect(),
    })
}

/// Per customer, per year: number of orders in each month
pub fn year_month_activity<'a, D>(data: &'a D) -> Query<'a, CustomerYearMonthActivity>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers()).map(|c| CustomerYearMonthActivity {
        company_name: c.company_name.clone(),
        years: group_by(&c.orders, |o| o.year())
            .into_iter()
            .map(|year| {
                let (year, orders) = year.into_parts();
                YearMonths {
                    year,
                    months: group_by(orders, |o| o.month())
                        .into_iter()
                        .map(|month| MonthCount {
                            month: *month.key(),
                            orders: month.len(),
                        })
                        .collect(),
                }
            })
            .collect(),
    })
}
