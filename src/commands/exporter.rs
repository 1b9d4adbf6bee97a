// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::history::{load_history, sale_rows};
use super::inventory::load_summary;
use super::report_skipped;
use crate::history::apply_query;
use crate::utils::{fmt_amount, fmt_unit_price};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("inventory", sub)) => export_inventory(conn, sub),
        Some(("history", sub)) => export_history(conn, sub),
        _ => Ok(()),
    }
}

fn format_and_out(sub: &clap::ArgMatches) -> Result<(String, String)> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .ok_or_else(|| anyhow!("--out missing"))?;
    Ok((fmt, out))
}

fn export_inventory(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = format_and_out(sub)?;
    let summary = load_summary(conn, sub)?;
    report_skipped(summary.skipped.len());

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out)?;
        wtr.write_record(["category", "product", "quantity", "price_per_unit", "total_price"])?;
        for p in &summary.products {
            let unit = match p.price_per_unit.value() {
                Some(_) => fmt_unit_price(&p.price_per_unit),
                None => String::new(),
            };
            wtr.write_record([
                p.category.clone(),
                p.name.clone(),
                p.quantity.normalize().to_string(),
                unit,
                fmt_amount(&p.total_price),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(&out, serde_json::to_string_pretty(&summary)?)?;
    }
    println!("Exported {} product(s) to {}", summary.products.len(), out);
    Ok(())
}

fn export_history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = format_and_out(sub)?;
    let query = sub.get_one::<String>("query").map(|s| s.as_str()).unwrap_or("");
    let records = load_history(conn, sub)?;
    let view = apply_query(&records, query);
    report_skipped(view.skipped.len());
    let rows = sale_rows(&view);

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out)?;
        wtr.write_record(["product", "category", "quantity", "price", "date"])?;
        for r in &rows {
            wtr.write_record([&r.product, &r.category, &r.quantity, &r.price, &r.date])?;
        }
        wtr.flush()?;
    } else {
        let body = json!({
            "query": query,
            "items": rows,
            "total": fmt_amount(&view.total),
            "skipped": view.skipped,
        });
        std::fs::write(&out, serde_json::to_string_pretty(&body)?)?;
    }
    println!("Exported {} sale(s) to {}", rows.len(), out);
    Ok(())
}
