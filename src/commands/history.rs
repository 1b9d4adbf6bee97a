// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{report_skipped, source_for};
use crate::history::apply_query;
use crate::models::{HistoryView, SaleRecord};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(conn, sub)?;
    }
    Ok(())
}

pub fn load_history(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<SaleRecord>> {
    source_for(conn, sub, false)?.sale_history()
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let query = sub.get_one::<String>("query").map(|s| s.as_str()).unwrap_or("");
    let records = load_history(conn, sub)?;
    let view = apply_query(&records, query);
    report_skipped(view.skipped.len());

    let printed = if jsonl_flag {
        maybe_print_json(false, true, &sale_rows(&view))?
    } else {
        maybe_print_json(json_flag, false, &view)?
    };
    if printed {
        return Ok(());
    }

    let rows: Vec<Vec<String>> = sale_rows(&view)
        .into_iter()
        .filter(|r| !r.product.is_empty())
        .map(|r| vec![r.product, r.category, r.quantity, r.price, r.date])
        .collect();
    println!(
        "{}",
        pretty_table(&["Product", "Category", "Qty Sold", "Price", "Date"], rows)
    );
    println!("Total amount: {}", fmt_amount(&view.total));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SaleRow {
    pub product: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
}

/// Display rows for a view; unreadable values are shown as the server sent them.
pub fn sale_rows(view: &HistoryView<'_>) -> Vec<SaleRow> {
    view.items
        .iter()
        .map(|r| SaleRow {
            product: r.name.clone().unwrap_or_default(),
            category: r.category.clone().unwrap_or_default(),
            quantity: r
                .quantity()
                .map(|q| q.normalize().to_string())
                .unwrap_or_else(|_| raw_text(r.quantity.as_ref())),
            price: r
                .price()
                .map(|p| fmt_amount(&p))
                .unwrap_or_else(|_| raw_text(r.price.as_ref())),
            date: r
                .created_at()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .or_else(|| r.created_at.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn raw_text(v: Option<&crate::models::RawAmount>) -> String {
    match v {
        Some(raw) => match serde_json::to_value(raw) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(other) => other.to_string(),
            Err(_) => String::new(),
        },
        None => String::new(),
    }
}
