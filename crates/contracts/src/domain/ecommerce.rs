use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::customer_segment::CustomerSegment;

// ============================================================================
// Customers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "customer_id", alias = "id")]
    pub id: String,
    #[serde(rename = "customer_name", alias = "name", default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    /// Region code (UF), e.g. "SP"
    pub state: String,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_id", alias = "id")]
    pub id: String,
    #[serde(rename = "product_name", alias = "name")]
    pub name: String,
    pub category: String,
    /// Current catalogue price. Revenue never uses it, see `OrderItem::unit_price`.
    #[serde(rename = "price", alias = "unit_price")]
    pub unit_price: f64,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "order_id", alias = "id")]
    pub id: String,
    pub customer_id: String,
    #[serde(deserialize_with = "deserialize_order_date")]
    pub order_date: NaiveDate,
    /// Open set of values ("Delivered", "Pending", "Cancelled", ...)
    pub status: String,
    /// Informational only, never summed
    #[serde(default)]
    pub total_amount: Option<f64>,
}

impl Order {
    /// Grouping key for every monthly series, "YYYY-MM"
    pub fn order_month(&self) -> String {
        month_key(self.order_date)
    }
}

/// Truncate a date to its "YYYY-MM" key
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse an order date written as a plain date, a naive timestamp or RFC 3339.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

fn deserialize_order_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_order_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid order_date: {raw:?}")))
}

// ============================================================================
// Order items
// ============================================================================

/// One order line. `(order_id, product_id)` is not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    /// Price snapshot at the time of sale
    pub unit_price: f64,
}

impl OrderItem {
    pub fn revenue(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// ============================================================================
// RFM segmentation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfmRecord {
    pub customer_id: String,
    /// Days since last order
    pub recency: u32,
    pub frequency: u32,
    pub monetary: f64,
    pub segment: CustomerSegment,
}
