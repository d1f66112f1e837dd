//! Sample Query Tests
//!
//! Runs every sample pipeline against the shared fixture dataset.

mod fixtures;

use fixtures::{money, names, product_names};
use relquery::config::{PriceTierConfig, QueryConfig};
use relquery::query::ContactRules;
use relquery::samples::{self, PriceTier, SampleQueries};
use rust_decimal::Decimal;

// =============================================================================
// Customer Filters
// =============================================================================

/// Customers whose orders sum above the threshold.
#[test]
fn test_customers_with_total_over() {
    let data = fixtures::dataset();
    let customers = samples::customers_with_total_over(&data, Decimal::from(104_000)).to_vec();
    assert_eq!(names(customers), vec!["B's Beverages"]);

    let customers = samples::customers_with_total_over(&data, Decimal::from(2_000)).to_vec();
    assert_eq!(
        names(customers),
        vec!["Alfreds Futterkiste", "Around the Horn", "B's Beverages"]
    );
}

/// Customers with any single order above the threshold.
#[test]
fn test_customers_with_order_over() {
    let data = fixtures::dataset();
    let customers = samples::customers_with_order_over(&data, Decimal::from(15_000)).to_vec();
    assert_eq!(names(customers), vec!["Around the Horn", "B's Beverages"]);
}

/// Blank region, non-digit postal code or phone without operator code.
#[test]
fn test_incomplete_contacts() {
    let data = fixtures::dataset();
    let rules = ContactRules::compile(&QueryConfig::default().contact).unwrap();
    let customers = samples::incomplete_contacts(&data, rules).to_vec();

    assert_eq!(
        names(customers),
        vec![
            "Alfreds Futterkiste",
            "Around the Horn",
            "B's Beverages",
            "Cactus Comidas",
            "Bolido Comidas",
        ]
    );
}

// =============================================================================
// First Order Projections
// =============================================================================

/// Customers without orders are skipped; month and year come from the earliest order.
#[test]
fn test_first_order_dates() {
    let data = fixtures::dataset();
    let rows = samples::first_order_dates(&data).try_to_vec().unwrap();

    let summary: Vec<(&str, u32, i32)> = rows
        .iter()
        .map(|r| (r.company_name.as_str(), r.month, r.year))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Alfreds Futterkiste", 8, 1997),
            ("Ana Trujillo", 9, 1996),
            ("Around the Horn", 11, 1996),
            ("B's Beverages", 11, 1997),
            ("Cactus Comidas", 8, 1997),
            ("Bolido Comidas", 8, 1997),
        ]
    );
}

/// Year asc, month asc, total desc, then company name asc.
#[test]
fn test_first_order_summaries_ordering() {
    let data = fixtures::dataset();
    let rows = samples::first_order_summaries(&data).try_to_vec().unwrap();

    let order: Vec<&str> = rows.iter().map(|r| r.company_name.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Ana Trujillo",
            "Around the Horn",
            "Alfreds Futterkiste",
            "Bolido Comidas",
            "Cactus Comidas",
            "B's Beverages",
        ]
    );
    assert_eq!(rows[2].total_sum, money("2493.70"));
    assert_eq!(rows[3].total_sum, rows[4].total_sum);
}

// =============================================================================
// Supplier Joins
// =============================================================================

/// Correlated and grouped joins agree, and unmatched customers are kept.
#[test]
fn test_suppliers_by_location() {
    let data = fixtures::dataset();

    let correlated: Vec<(String, Vec<String>)> = samples::suppliers_by_location(&data)
        .iter()
        .map(|row| {
            let suppliers = row.matches.iter().map(|s| s.supplier_name.clone()).collect();
            (row.left.customer_id.clone(), suppliers)
        })
        .collect();

    let grouped: Vec<(String, Vec<String>)> = samples::suppliers_by_location_grouped(&data)
        .iter()
        .map(|row| {
            let suppliers = row.matches.iter().map(|s| s.supplier_name.clone()).collect();
            (row.left.customer_id.clone(), suppliers)
        })
        .collect();

    assert_eq!(correlated, grouped);
    assert_eq!(grouped.len(), 7);
    assert_eq!(grouped[0].1, vec!["Heli Suesswaren"]);
    assert!(grouped[1].1.is_empty());
    assert_eq!(grouped[2].1, vec!["Exotic Liquids", "Thames Goods"]);
}

// =============================================================================
// Product Groupings
// =============================================================================

/// Category, then stock level, then price ascending.
#[test]
fn test_products_by_category_and_stock() {
    let data = fixtures::dataset();
    let categories = samples::products_by_category_and_stock(&data).to_vec();

    let keys: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(keys, vec!["Condiments", "Beverages", "Meat/Poultry", "Seafood"]);

    let beverages = &categories[1];
    let levels: Vec<u32> = beverages.stock_levels.iter().map(|l| l.units_in_stock).collect();
    assert_eq!(levels, vec![39, 17, 10]);
    assert_eq!(
        product_names(&beverages.stock_levels[1].products),
        vec!["Chang", "Cote de Blaye"]
    );
    assert_eq!(
        product_names(&beverages.stock_levels[2].products),
        vec!["Sasquatch Ale", "Guarana Fantastica"]
    );
}

/// Price tiers in first-appearance order, members in source order.
#[test]
fn test_products_by_price_tier() {
    let data = fixtures::dataset();
    let tiers = samples::products_by_price_tier(&data, PriceTierConfig::default()).to_vec();

    let keys: Vec<PriceTier> = tiers.iter().map(|t| t.tier).collect();
    assert_eq!(keys, vec![PriceTier::Average, PriceTier::Cheap, PriceTier::Expensive]);
    assert_eq!(
        product_names(&tiers[0].products),
        vec!["Aniseed Syrup", "Chai", "Chang", "Cajun Seasoning"]
    );
    assert_eq!(
        product_names(&tiers[1].products),
        vec!["Guarana Fantastica", "Sasquatch Ale", "Konbu"]
    );
    assert_eq!(
        product_names(&tiers[2].products),
        vec!["Mishi Kobe Niku", "Cote de Blaye"]
    );
}

// =============================================================================
// Statistics
// =============================================================================

/// Per-city figures add per-customer averages rather than averaging orders.
#[test]
fn test_city_statistics_sums_customer_averages() {
    let data = fixtures::dataset();
    let rows = samples::city_statistics(&data).try_to_vec().unwrap();

    let cities: Vec<&str> = rows.iter().map(|r| r.city.as_str()).collect();
    assert_eq!(
        cities,
        vec!["Berlin", "Mexico D.F.", "London", "Buenos Aires", "Madrid"]
    );

    let london = &rows[2];
    // (480 + 20000) / 2 + (60000 + 44001) / 2
    assert_eq!(london.sum_of_average_totals, money("62240.5"));
    assert_eq!(london.average_order_count, 2.0);

    let berlin = &rows[0];
    assert_eq!(berlin.sum_of_average_totals, money("623.425"));
    assert_eq!(berlin.average_order_count, 4.0);
}

/// Month activity divides the month's orders by the distinct years they span.
#[test]
fn test_monthly_activity() {
    let data = fixtures::dataset();
    let rows = samples::monthly_activity(&data).to_vec();
    assert_eq!(rows.len(), 7);

    let alfki = &rows[0];
    let months: Vec<u32> = alfki.months.iter().map(|m| m.month).collect();
    assert_eq!(months, vec![8, 10, 1, 3]);
    assert!(alfki.months.iter().all(|m| m.activity == 1.0));

    let bsbev = &rows[4];
    assert_eq!(bsbev.months.len(), 1);
    assert_eq!(bsbev.months[0].activity, 1.0);

    let bolid = &rows[6];
    assert_eq!(bolid.months[0].month, 8);
    assert_eq!(bolid.months[0].activity, 2.0);

    let bergs = &rows[3];
    assert!(bergs.months.is_empty());
}

/// Orders per year, and per month within each year.
#[test]
fn test_yearly_and_year_month_activity() {
    let data = fixtures::dataset();

    let yearly = samples::yearly_activity(&data).to_vec();
    let alfki: Vec<(i32, usize)> = yearly[0].years.iter().map(|y| (y.year, y.orders)).collect();
    assert_eq!(alfki, vec![(1997, 2), (1998, 2)]);

    let nested = samples::year_month_activity(&data).to_vec();
    let alfki = &nested[0];
    assert_eq!(alfki.company_name, "Alfreds Futterkiste");
    assert_eq!(alfki.years.len(), 2);
    let months_1998: Vec<(u32, usize)> = alfki.years[1]
        .months
        .iter()
        .map(|m| (m.month, m.orders))
        .collect();
    assert_eq!(months_1998, vec![(1, 1), (3, 1)]);

    let bolid = &nested[6];
    assert_eq!(bolid.years[0].months[0].orders, 2);
}

// =============================================================================
// Configured Queries
// =============================================================================

/// Thresholds and rules flow from configuration.
#[test]
fn test_sample_queries_use_config() {
    let data = fixtures::dataset();
    let config = QueryConfig::from_json_str(
        r#"{"order_total_threshold": 20000, "single_order_threshold": 50000}"#,
    )
    .unwrap();
    let queries = SampleQueries::new(&data, config).unwrap();

    assert_eq!(
        names(queries.large_total_customers().to_vec()),
        vec!["Around the Horn", "B's Beverages"]
    );
    assert_eq!(
        names(queries.large_order_customers().to_vec()),
        vec!["B's Beverages"]
    );
    assert_eq!(queries.incomplete_contacts().count(), 5);
    assert_eq!(queries.products_by_price_tier().count(), 3);
}

/// Serialized output exposes nested sequences to a generic sink.
#[test]
fn test_results_serialize_for_sinks() {
    let data = fixtures::dataset();
    let tiers = samples::products_by_price_tier(&data, PriceTierConfig::default());

    let json = serde_json::to_value(&tiers).unwrap();
    assert_eq!(json[0]["tier"], "average");
    assert_eq!(json[0]["products"][0]["product_name"], "Aniseed Syrup");

    let correlated = samples::suppliers_by_location(&data);
    let json = serde_json::to_value(&correlated).unwrap();
    assert_eq!(json[0]["left"]["customer_id"], "ALFKI");
    assert_eq!(json[0]["matches"][0]["supplier_name"], "Heli Suesswaren");
}
