// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Groups inventory lines by category and product into a card list and a
//! pie-chart series.

use crate::error::RecordError;
use crate::models::{
    AggregatedProduct, ChartSlice, InventoryRecord, InventorySummary, MalformedRecord, UnitPrice,
};
use crate::palette::Palette;
use rust_decimal::Decimal;
use std::collections::{HashMap, hash_map::Entry};

struct Group {
    category: String,
    product: String,
    quantity: Decimal,
    price: Decimal,
    records: usize,
}

fn skip(skipped: &mut Vec<MalformedRecord>, index: usize, rec: &InventoryRecord, error: RecordError) {
    tracing::warn!(index, product = ?rec.product, %error, "skipping inventory record");
    skipped.push(MalformedRecord {
        index,
        label: rec.product.clone(),
        error,
    });
}

fn parse_line(rec: &InventoryRecord) -> Result<(&str, Decimal, Decimal), RecordError> {
    let product = rec.product_label()?;
    let quantity = rec.quantity()?;
    let price = rec.price()?;
    Ok((product, quantity, price))
}

/// Aggregate one snapshot of inventory lines.
///
/// Groups come out in first-seen order of their (category, product) key.
/// Lines whose product, quantity or price cannot be read are left out and
/// reported in `skipped`.
pub fn aggregate(records: &[InventoryRecord]) -> InventorySummary {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    let mut skipped = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let (product, quantity, price) = match parse_line(rec) {
            Ok(parsed) => parsed,
            Err(error) => {
                skip(&mut skipped, i, rec, error);
                continue;
            }
        };
        let category = rec.category_label();
        let slot = match index.entry((category.to_string(), product.to_string())) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                groups.push(Group {
                    category: category.to_string(),
                    product: product.to_string(),
                    quantity: Decimal::ZERO,
                    price: Decimal::ZERO,
                    records: 0,
                });
                *entry.insert(groups.len() - 1)
            }
        };
        let g = &mut groups[slot];
        let sums = match (g.quantity.checked_add(quantity), g.price.checked_add(price)) {
            (Some(q), Some(p)) => Ok((q, p)),
            (None, _) => Err(RecordError::Overflow { field: "quantity" }),
            (_, None) => Err(RecordError::Overflow { field: "price" }),
        };
        match sums {
            Ok((q, p)) => {
                g.quantity = q;
                g.price = p;
                g.records += 1;
            }
            // a fresh group starts at zero, so only an existing group can overflow
            Err(error) => skip(&mut skipped, i, rec, error),
        }
    }

    let mut palette = Palette::new();
    let mut products = Vec::with_capacity(groups.len());
    let mut slices = Vec::with_capacity(groups.len());
    for g in groups {
        slices.push(ChartSlice {
            label: format!("{} ({})", g.product, g.category),
            value: g.quantity,
            color: palette.next_color(),
        });
        products.push(AggregatedProduct {
            price_per_unit: UnitPrice::of(g.price, g.quantity),
            category: g.category,
            name: g.product,
            quantity: g.quantity,
            total_price: g.price,
            record_count: g.records,
        });
    }

    tracing::debug!(
        records = records.len(),
        groups = products.len(),
        skipped = skipped.len(),
        "aggregated inventory"
    );
    InventorySummary {
        products,
        slices,
        skipped,
    }
}
