//! Shared test harness for storage backend testing
//!
//! Provides a deterministic 25-row dataset with known distributions and
//! helpers for building individual transactions.
//!
//! # Dataset (row `i` in `1..=25`, id `TX-{i:03}`)
//!
//! | attribute      | rule                                                   |
//! |----------------|--------------------------------------------------------|
//! | date           | `2023-12-31` for row 1, `2024-01-{i:02}` otherwise     |
//! | customer name  | `Customer {i:02}`, except row 7 is `Ada Lovelace` and  |
//! |                | row 13 is `bianca Rossi`                               |
//! | phone          | `+91 98765 {i:05}`                                     |
//! | gender         | `Male` when `i` is even, `Female` otherwise            |
//! | age            | `18 + 2i`                                              |
//! | region         | `[North, South, East, West][i % 4]`                    |
//! | category       | `[Electronics, Clothing, Beauty][i % 3]`               |
//! | tags           | by `i % 5`: `Electronics, Sale` / `Sale, Clearance` /  |
//! |                | `organic, fresh` / `red, Sale` / empty                 |
//! | payment method | `[UPI, Cash, Credit Card][(i / 2) % 3]`                |
//! | quantity       | `i % 4 + 1`                                            |
//! | amounts        | gross `100 × quantity`; final is 10 less for odd `i`   |
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_tests;

use sales_query::core::{
    Customer, FilterSpecification, Logistics, PredicateSet, Product, SalesInfo, Transaction,
};

pub const DATASET_SIZE: usize = 25;

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const CATEGORIES: [&str; 3] = ["Electronics", "Clothing", "Beauty"];
const PAYMENT_METHODS: [&str; 3] = ["UPI", "Cash", "Credit Card"];
const TAGS: [&str; 5] = [
    "Electronics, Sale",
    "Sale, Clearance",
    "organic, fresh",
    "red, Sale",
    "",
];

/// A transaction with every attribute populated
pub fn sample_transaction(id: &str, date: &str) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
        date: date.to_string(),
        customer: Customer {
            id: format!("CUST-{}", id),
            name: "Sample Customer".to_string(),
            phone: "+91 90000 00000".to_string(),
            gender: "Female".to_string(),
            age: 30,
            region: "North".to_string(),
            customer_type: "Regular".to_string(),
        },
        product: Product {
            id: "PROD-1".to_string(),
            name: "Wireless Mouse".to_string(),
            brand: "Acme".to_string(),
            category: "Electronics".to_string(),
            tags: "Electronics, Sale".to_string(),
        },
        sales: SalesInfo {
            quantity: 1,
            price: 100.0,
            discount: 0.0,
            total: 100.0,
            final_amount: 100.0,
        },
        logistics: Logistics {
            payment_method: "UPI".to_string(),
            order_status: "Completed".to_string(),
            delivery_type: "Standard".to_string(),
            store_id: "ST-1".to_string(),
            store_location: "Mumbai".to_string(),
            salesperson_id: "SP-1".to_string(),
            employee_name: "Harsh Agarwal".to_string(),
        },
    }
}

/// Row `i` of the dataset
pub fn dataset_row(i: usize) -> Transaction {
    let date = if i == 1 {
        "2023-12-31".to_string()
    } else {
        format!("2024-01-{:02}", i)
    };
    let mut tx = sample_transaction(&format!("TX-{:03}", i), &date);

    tx.customer.name = match i {
        7 => "Ada Lovelace".to_string(),
        13 => "bianca Rossi".to_string(),
        _ => format!("Customer {:02}", i),
    };
    tx.customer.phone = format!("+91 98765 {:05}", i);
    tx.customer.gender = if i % 2 == 0 { "Male" } else { "Female" }.to_string();
    tx.customer.age = 18 + 2 * i as u32;
    tx.customer.region = REGIONS[i % 4].to_string();
    tx.product.category = CATEGORIES[i % 3].to_string();
    tx.product.tags = TAGS[i % 5].to_string();
    tx.logistics.payment_method = PAYMENT_METHODS[(i / 2) % 3].to_string();

    let quantity = (i % 4) as u32 + 1;
    let gross = 100.0 * f64::from(quantity);
    tx.sales = SalesInfo {
        quantity,
        price: 100.0,
        discount: if i % 2 == 1 { 10.0 / gross * 100.0 } else { 0.0 },
        total: gross,
        final_amount: if i % 2 == 1 { gross - 10.0 } else { gross },
    };

    tx
}

/// The full 25-row dataset, in id order
pub fn dataset() -> Vec<Transaction> {
    (1..=DATASET_SIZE).map(dataset_row).collect()
}

/// Ids of the dataset rows matching `spec`, evaluated row by row
pub fn expected_ids(spec: &FilterSpecification) -> Vec<String> {
    let predicates = PredicateSet::from_spec(spec);
    let mut ids: Vec<String> = dataset()
        .into_iter()
        .filter(|tx| predicates.matches(tx))
        .map(|tx| tx.transaction_id)
        .collect();
    ids.sort();
    ids
}

/// Transaction ids in returned order
pub fn ids(rows: &[Transaction]) -> Vec<String> {
    rows.iter().map(|tx| tx.transaction_id.clone()).collect()
}

/// Transaction ids, sorted
pub fn sorted_ids(rows: &[Transaction]) -> Vec<String> {
    let mut ids = ids(rows);
    ids.sort();
    ids
}
