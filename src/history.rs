// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-text search over a sale-history snapshot.

use crate::error::RecordError;
use crate::models::{HistoryView, MalformedRecord, SaleRecord};
use rust_decimal::Decimal;

fn normalize(s: &str) -> String {
    s.to_lowercase()
}

fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| normalize(f).contains(needle))
}

/// True when `needle` (already normalized) occurs in the sale's name or category.
pub fn matches(rec: &SaleRecord, needle: &str) -> bool {
    needle.is_empty()
        || field_matches(rec.name.as_deref(), needle)
        || field_matches(rec.category.as_deref(), needle)
}

/// Filter `records` by `query` and total the matching prices.
///
/// Only the empty query returns every record; whitespace is matched like
/// any other text. Matches keep their fetch order. A sale whose price cannot
/// be read, or would overflow the total, stays in `items` but is left out of
/// `total` and listed in `skipped`.
pub fn apply_query<'a>(records: &'a [SaleRecord], query: &str) -> HistoryView<'a> {
    let needle = normalize(query);
    let mut items = Vec::new();
    let mut total = Decimal::ZERO;
    let mut skipped = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        if !matches(rec, &needle) {
            continue;
        }
        let summed = rec.price().and_then(|p| {
            total
                .checked_add(p)
                .ok_or(RecordError::Overflow { field: "price" })
        });
        match summed {
            Ok(t) => total = t,
            Err(error) => {
                tracing::warn!(index = i, name = ?rec.name, %error, "sale left out of total");
                skipped.push(MalformedRecord {
                    index: i,
                    label: rec.name.clone(),
                    error,
                });
            }
        }
        items.push(rec);
    }

    HistoryView {
        items,
        total,
        skipped,
    }
}

/// An owned sale-history snapshot that can be re-queried as the search text changes.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    records: Vec<SaleRecord>,
    query: String,
}

impl HistoryFilter {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self {
            records,
            query: String::new(),
        }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the active query and return the view for it.
    pub fn set_query(&mut self, query: &str) -> HistoryView<'_> {
        self.query = query.to_string();
        self.view()
    }

    pub fn view(&self) -> HistoryView<'_> {
        apply_query(&self.records, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SaleRecord> {
        vec![
            SaleRecord::new("Rice", "Grain", "1", "50"),
            SaleRecord::new("Wheat", "Grain", "2", "30"),
            SaleRecord::new("Tomato", "Veg", "3", "20"),
        ]
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let recs = sample();
        let v = apply_query(&recs, "rICE");
        assert_eq!(v.len(), 1);
        assert_eq!(v.items[0].name.as_deref(), Some("Rice"));
        assert_eq!(v.total, Decimal::from(50));
    }

    #[test]
    fn query_matches_category() {
        let recs = sample();
        let v = apply_query(&recs, "grain");
        assert_eq!(v.len(), 2);
        assert_eq!(v.total, Decimal::from(80));
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let recs = sample();
        let v = apply_query(&recs, "");
        assert_eq!(v.len(), 3);
        assert!(std::ptr::eq(v.items[2], &recs[2]));
        assert_eq!(v.total, Decimal::from(100));
    }

    #[test]
    fn records_without_labels_only_match_empty_query() {
        let recs = vec![SaleRecord {
            price: Some("10".into()),
            ..SaleRecord::default()
        }];
        assert!(apply_query(&recs, "a").is_empty());
        assert_eq!(apply_query(&recs, "").total, Decimal::from(10));
    }

    #[test]
    fn whitespace_query_is_not_empty() {
        let mut recs = sample();
        recs.push(SaleRecord {
            price: Some("10".into()),
            ..SaleRecord::default()
        });
        recs.push(SaleRecord::new("Red Chilli", "Spice", "1", "5"));
        let v = apply_query(&recs, " ");
        assert_eq!(v.len(), 1);
        assert_eq!(v.items[0].name.as_deref(), Some("Red Chilli"));
        assert_eq!(v.total, Decimal::from(5));
    }

    #[test]
    fn sale_that_would_overflow_the_total_is_listed_but_skipped() {
        let big = Decimal::MAX.to_string();
        let recs = vec![
            SaleRecord::new("Rice", "Grain", "1", &big),
            SaleRecord::new("Wheat", "Grain", "1", &big),
        ];
        let v = apply_query(&recs, "");
        assert_eq!(v.len(), 2);
        assert_eq!(v.total, Decimal::MAX);
        assert_eq!(v.skipped.len(), 1);
        assert_eq!(v.skipped[0].index, 1);
        assert_eq!(v.skipped[0].error, RecordError::Overflow { field: "price" });
    }

    #[test]
    fn bad_price_stays_listed_but_not_summed() {
        let mut recs = sample();
        recs[1].price = Some("n/a".into());
        let v = apply_query(&recs, "grain");
        assert_eq!(v.len(), 2);
        assert_eq!(v.total, Decimal::from(50));
        assert_eq!(v.skipped.len(), 1);
        assert_eq!(v.skipped[0].index, 1);
    }

    #[test]
    fn no_match_gives_empty_view_with_zero_total() {
        let recs = sample();
        let v = apply_query(&recs, "sugar");
        assert!(v.is_empty());
        assert_eq!(v.total, Decimal::ZERO);
    }

    #[test]
    fn clearing_the_query_restores_the_full_view() {
        let mut f = HistoryFilter::new(sample());
        assert_eq!(f.set_query("veg").len(), 1);
        assert_eq!(f.query(), "veg");
        let full = f.set_query("");
        assert_eq!(full.len(), 3);
        assert_eq!(full.total, Decimal::from(100));
    }
}
