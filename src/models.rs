// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::RecordError;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Group label used for inventory lines that arrive without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A numeric field exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl RawAmount {
    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, RecordError> {
        let raw = match self {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s.trim().to_string(),
            RawAmount::Other(v) => {
                return Err(RecordError::InvalidNumber {
                    field,
                    raw: v.to_string(),
                });
            }
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|_| RecordError::InvalidNumber { field, raw })
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

fn required_amount(
    value: Option<&RawAmount>,
    field: &'static str,
) -> Result<Decimal, RecordError> {
    value
        .ok_or(RecordError::MissingField { field })?
        .to_decimal(field)
}

// Labels are text on the wire, but numbers are tolerated and anything else
// is treated as absent so one odd row cannot fail the whole snapshot.
fn lenient_label<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// One inventory transaction line from `/getProductInventory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<RawAmount>,
    #[serde(default)]
    pub price: Option<RawAmount>,
}

impl InventoryRecord {
    pub fn new(category: &str, product: &str, quantity: &str, price: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            product: Some(product.to_string()),
            quantity: Some(quantity.into()),
            price: Some(price.into()),
        }
    }

    /// Category to group under; blank and missing both map to [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    pub fn product_label(&self) -> Result<&str, RecordError> {
        match self.product.as_deref() {
            Some(p) if !p.trim().is_empty() => Ok(p),
            _ => Err(RecordError::MissingField { field: "product" }),
        }
    }

    pub fn quantity(&self) -> Result<Decimal, RecordError> {
        let q = required_amount(self.quantity.as_ref(), "quantity")?;
        if q.is_sign_negative() && !q.is_zero() {
            return Err(RecordError::NegativeQuantity { raw: q.to_string() });
        }
        Ok(q)
    }

    pub fn price(&self) -> Result<Decimal, RecordError> {
        required_amount(self.price.as_ref(), "price")
    }
}

/// One completed sale from `/getSaleHistory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "lenient_label")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<RawAmount>,
    #[serde(default)]
    pub price: Option<RawAmount>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub created_at: Option<String>,
}

impl SaleRecord {
    pub fn new(name: &str, category: &str, quantity: &str, price: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            quantity: Some(quantity.into()),
            price: Some(price.into()),
            created_at: None,
        }
    }

    pub fn price(&self) -> Result<Decimal, RecordError> {
        required_amount(self.price.as_ref(), "price")
    }

    pub fn quantity(&self) -> Result<Decimal, RecordError> {
        required_amount(self.quantity.as_ref(), "quantity")
    }

    /// Sale timestamp; accepts RFC 3339 and the server's naive `YYYY-MM-DD HH:MM:SS` form.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
            .map(|n| n.and_utc())
    }
}

/// Unit price of an aggregated product; unavailable when nothing is in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPrice {
    Defined(Decimal),
    Unavailable,
}

impl UnitPrice {
    pub fn of(total_price: Decimal, quantity: Decimal) -> Self {
        if quantity.is_zero() {
            return UnitPrice::Unavailable;
        }
        match total_price.checked_div(quantity) {
            Some(p) => UnitPrice::Defined(p),
            None => UnitPrice::Unavailable,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            UnitPrice::Defined(p) => Some(*p),
            UnitPrice::Unavailable => None,
        }
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            UnitPrice::Defined(p) => Serialize::serialize(p, s),
            UnitPrice::Unavailable => s.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedProduct {
    pub category: String,
    pub name: String,
    pub quantity: Decimal,
    pub total_price: Decimal,
    pub price_per_unit: UnitPrice,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: Decimal,
    pub color: String,
}

/// A record left out of a sum, with its position in the fetched snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedRecord {
    pub index: usize,
    pub label: Option<String>,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventorySummary {
    pub products: Vec<AggregatedProduct>,
    pub slices: Vec<ChartSlice>,
    pub skipped: Vec<MalformedRecord>,
}

impl InventorySummary {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sum of all product quantities; `None` if it does not fit in a `Decimal`.
    pub fn total_quantity(&self) -> Option<Decimal> {
        self.products
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.quantity))
    }

    pub fn total_value(&self) -> Option<Decimal> {
        self.products
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.total_price))
    }
}

/// Sale history narrowed to one query; `items` borrow from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryView<'a> {
    pub items: Vec<&'a SaleRecord>,
    pub total: Decimal,
    pub skipped: Vec<MalformedRecord>,
}

impl HistoryView<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
