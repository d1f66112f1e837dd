//! Product groupings

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::PriceTierConfig;
use crate::model::{DataSource, Product};
use crate::query::{group_by, Query, SortSpec};

/// Products with the same stock level, cheapest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockLevel<'a> {
    pub units_in_stock: u32,
    pub products: Vec<&'a Product>,
}

/// A category and its stock levels, in first-appearance order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStock<'a> {
    pub category: String,
    pub stock_levels: Vec<StockLevel<'a>>,
}

/// Price bucket of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Cheap,
    Average,
    Expensive,
}

impl PriceTier {
    /// Classifies a unit price against the configured bounds
    pub fn classify(unit_price: Decimal, tiers: &PriceTierConfig) -> Self {
        if unit_price < tiers.cheap_below {
            PriceTier::Cheap
        } else if unit_price > tiers.expensive_above {
            PriceTier::Expensive
        } else {
            PriceTier::Average
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Cheap => "cheap",
            PriceTier::Average => "average",
            PriceTier::Expensive => "expensive",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Products of one price tier, in source order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTierGroup<'a> {
    pub tier: PriceTier,
    pub products: Vec<&'a Product>,
}

/// Products grouped by category, then by units in stock, each stock level
/// sorted by unit price
pub fn products_by_category_and_stock<'a, D>(data: &'a D) -> Query<'a, CategoryStock<'a>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.products())
        .group_by(|p| p.category.clone())
        .map(|category| {
            let (category, products) = category.into_parts();
            let by_price = SortSpec::asc(|p: &&'a Product| p.unit_price);
            let stock_levels = group_by(products, |p| p.units_in_stock)
                .into_iter()
                .map(|level| {
                    let level = level.sorted_by(&by_price);
                    StockLevel {
                        units_in_stock: *level.key(),
                        products: level.into_items(),
                    }
                })
                .collect();

            CategoryStock {
                category,
                stock_levels,
            }
        })
}

/// Products grouped into cheap, average and expensive tiers
pub fn products_by_price_tier<'a, D>(data: &'a D, tiers: PriceTierConfig) -> Query<'a, PriceTierGroup<'a>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.products())
        .group_by(move |p| PriceTier::classify(p.unit_price, &tiers))
        .map(|group| {
            let (tier, products) = group.into_parts();
            PriceTierGroup { tier, products }
        })
}
