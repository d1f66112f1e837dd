//! Shared dataset for integration tests
//!
//! A small Northwind-style dataset. Customers, products and suppliers are
//! listed in an order that differs from alphabetical so first-occurrence
//! ordering is observable.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use relquery::model::{Customer, Dataset, Order, Product, Supplier};
use rust_decimal::Decimal;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid fixture date")
}

pub fn money(amount: &str) -> Decimal {
    amount.parse().expect("valid fixture amount")
}

fn order(id: u32, at: NaiveDateTime, total: &str) -> Order {
    Order::new(id, at, money(total))
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer::new("ALFKI", "Alfreds Futterkiste", "Berlin", "Germany")
            .with_postal_code("12209")
            .with_phone("030-0074321")
            .with_orders(vec![
                order(1, date(1997, 8, 25), "814.50"),
                order(2, date(1997, 10, 3), "878.00"),
                order(3, date(1998, 1, 15), "330.00"),
                order(4, date(1998, 3, 16), "471.20"),
            ]),
        Customer::new("ANATR", "Ana Trujillo", "Mexico D.F.", "Mexico")
            .with_region("DF")
            .with_postal_code("05021")
            .with_phone("(5) 555-4729")
            .with_orders(vec![
                order(5, date(1996, 9, 18), "88.80"),
                order(6, date(1997, 8, 8), "479.75"),
            ]),
        Customer::new("AROUT", "Around the Horn", "London", "UK")
            .with_region("Essex")
            .with_postal_code("WA1 1DP")
            .with_phone("(171) 555-7788")
            .with_orders(vec![
                order(7, date(1996, 11, 15), "480.00"),
                order(8, date(1997, 11, 15), "20000.00"),
            ]),
        Customer::new("BERGS", "Berglunds snabbkop", "Lulea", "Sweden")
            .with_region("NB")
            .with_postal_code("95822")
            .with_phone("(0921) 12 34 65"),
        Customer::new("BSBEV", "B's Beverages", "London", "UK")
            .with_region(" ")
            .with_postal_code("12345")
            .with_phone("(171) 555-1212")
            .with_orders(vec![
                order(9, date(1997, 11, 10), "60000.00"),
                order(10, date(1998, 11, 10), "44001.00"),
            ]),
        Customer::new("CACTU", "Cactus Comidas", "Buenos Aires", "Argentina")
            .with_postal_code("1010")
            .with_phone("(1) 135-5555")
            .with_orders(vec![order(11, date(1997, 8, 20), "2000.00")]),
        Customer::new("BOLID", "Bolido Comidas", "Madrid", "Spain")
            .with_postal_code("28023")
            .with_phone("(91) 555 22 82")
            .with_orders(vec![
                order(12, date(1997, 8, 30), "1500.00"),
                order(13, date(1997, 8, 31), "500.00"),
            ]),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new(3, "Aniseed Syrup", "Condiments", 13, money("10.00")),
        Product::new(1, "Chai", "Beverages", 39, money("18.00")),
        Product::new(2, "Chang", "Beverages", 17, money("19.00")),
        Product::new(24, "Guarana Fantastica", "Beverages", 10, money("9.00")),
        Product::new(4, "Cajun Seasoning", "Condiments", 53, money("22.00")),
        Product::new(34, "Sasquatch Ale", "Beverages", 10, money("5.00")),
        Product::new(9, "Mishi Kobe Niku", "Meat/Poultry", 29, money("97.00")),
        Product::new(38, "Cote de Blaye", "Beverages", 17, money("263.50")),
        Product::new(13, "Konbu", "Seafood", 24, money("6.00")),
    ]
}

pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier::new("Exotic Liquids", "London", "UK"),
        Supplier::new("Heli Suesswaren", "Berlin", "Germany"),
        Supplier::new("Plutzer Lebensmittel", "Frankfurt", "Germany"),
        Supplier::new("Maple Syrups", "London", "Canada"),
        Supplier::new("Thames Goods", "London", "UK"),
        Supplier::new("Refrescos Americanas", "Sao Paulo", "Brazil"),
    ]
}

pub fn dataset() -> Dataset {
    Dataset::new(customers(), products(), suppliers())
}

pub fn names<'a>(customers: impl IntoIterator<Item = &'a Customer>) -> Vec<&'a str> {
    customers
        .into_iter()
        .map(|c| c.company_name.as_str())
        .collect()
}

pub fn product_names<'a>(products: impl IntoIterator<Item = &'a &'a Product>) -> Vec<&'a str> {
    products
        .into_iter()
        .map(|p| p.product_name.as_str())
        .collect()
}
