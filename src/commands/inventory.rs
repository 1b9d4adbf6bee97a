// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{report_skipped, source_for};
use crate::inventory::aggregate;
use crate::models::InventorySummary;
use crate::utils::{fmt_amount, fmt_unit_price, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("show", sub)) = m.subcommand() {
        show(conn, sub)?;
    }
    Ok(())
}

/// Fetch and aggregate the inventory snapshot named by `sub`.
pub fn load_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<InventorySummary> {
    let records = source_for(conn, sub, true)?.inventory()?;
    Ok(aggregate(&records))
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let chart = sub.get_flag("chart");
    let summary = load_summary(conn, sub)?;
    report_skipped(summary.skipped.len());

    let printed = if chart {
        maybe_print_json(json_flag, jsonl_flag, &summary.slices)?
    } else if jsonl_flag {
        maybe_print_json(false, true, &summary.products)?
    } else {
        maybe_print_json(json_flag, false, &summary)?
    };
    if printed {
        return Ok(());
    }

    if summary.is_empty() {
        println!("No inventory data available.");
        return Ok(());
    }
    if chart {
        println!(
            "{}",
            pretty_table(&["Slice", "Quantity", "Colour"], slice_rows(&summary))
        );
    } else {
        println!(
            "{}",
            pretty_table(
                &["Category", "Product", "Quantity", "Price/Unit", "Total Price"],
                product_rows(&summary),
            )
        );
        let quantity = summary
            .total_quantity()
            .map(|q| q.normalize().to_string())
            .unwrap_or_else(|| "overflow".into());
        let value = summary
            .total_value()
            .map(|v| fmt_amount(&v))
            .unwrap_or_else(|| "overflow".into());
        println!("Total quantity: {}  Total value: {}", quantity, value);
    }
    Ok(())
}

pub fn product_rows(summary: &InventorySummary) -> Vec<Vec<String>> {
    summary
        .products
        .iter()
        .map(|p| {
            vec![
                p.category.clone(),
                p.name.clone(),
                p.quantity.normalize().to_string(),
                fmt_unit_price(&p.price_per_unit),
                fmt_amount(&p.total_price),
            ]
        })
        .collect()
}

pub fn slice_rows(summary: &InventorySummary) -> Vec<Vec<String>> {
    summary
        .slices
        .iter()
        .map(|s| vec![s.label.clone(), s.value.normalize().to_string(), s.color.clone()])
        .collect()
}
