//! Sales transaction record
//!
//! A `Transaction` is stored with its customer, product, sales and logistics
//! attributes as embedded structs. On the wire every embedded struct is
//! flattened into a single object, so a serialized transaction looks like:
//!
//! ```json
//! {
//!   "transaction_id": "T-1001",
//!   "date": "2024-01-15",
//!   "customer_id": "C-17",
//!   "customer_name": "Ada Lovelace",
//!   "tags": ["Electronics", "Sale"],
//!   "quantity": 2,
//!   "payment_method": "Credit Card"
//! }
//! ```
//!
//! (abbreviated; see the field attributes for the complete key set)

use serde::{Deserialize, Serialize};

/// One sales transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,

    /// ISO date string; compared lexicographically
    pub date: String,

    #[serde(flatten)]
    pub customer: Customer,

    #[serde(flatten)]
    pub product: Product,

    #[serde(flatten)]
    pub sales: SalesInfo,

    #[serde(flatten)]
    pub logistics: Logistics,
}

/// Customer attributes embedded in a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "customer_id")]
    pub id: String,

    #[serde(rename = "customer_name")]
    pub name: String,

    pub phone: String,
    pub gender: String,
    pub age: u32,
    pub region: String,

    pub customer_type: String,
}

/// Product attributes embedded in a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    pub id: String,

    #[serde(rename = "product_name")]
    pub name: String,

    pub brand: String,
    pub category: String,

    /// Comma-joined tag string as stored, e.g. `"Electronics, Sale"`
    ///
    /// Serialized as an array of trimmed tags; deserialized from either form.
    #[serde(with = "tag_list")]
    pub tags: String,
}

impl Product {
    /// Split the stored tag string into trimmed, non-empty tags
    pub fn tag_list(&self) -> Vec<&str> {
        split_tags(&self.tags).collect()
    }
}

/// Sales figures embedded in a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesInfo {
    pub quantity: u32,

    #[serde(rename = "price_per_unit")]
    pub price: f64,

    #[serde(rename = "discount_percentage")]
    pub discount: f64,

    /// Gross amount before discount
    #[serde(rename = "total_amount")]
    pub total: f64,

    /// Amount actually charged
    pub final_amount: f64,
}

impl SalesInfo {
    /// Absolute discount granted on this sale (gross minus final)
    pub fn discount_amount(&self) -> f64 {
        self.total - self.final_amount
    }
}

/// Logistics attributes embedded in a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logistics {
    pub payment_method: String,

    #[serde(rename = "ordered_status")]
    pub order_status: String,

    pub delivery_type: String,
    pub store_id: String,
    pub store_location: String,

    pub salesperson_id: String,

    pub employee_name: String,
}

/// Split a comma-joined tag string into trimmed, non-empty tags
pub fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// Serde adapter: comma-joined string in memory, array of tags on the wire
mod tag_list {
    use super::split_tags;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(raw: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(split_tags(raw))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsRepr {
        Joined(String),
        List(Vec<String>),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match TagsRepr::deserialize(deserializer)? {
            TagsRepr::Joined(raw) => raw,
            TagsRepr::List(tags) => tags.join(","),
        })
    }
}
