// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::http_source;
use crate::history::apply_query;
use crate::inventory::aggregate;
use crate::models::{InventoryRecord, MalformedRecord, SaleRecord};
use crate::source::{FileSource, RecordSource};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let src: Box<dyn RecordSource> = match (
        sub.get_one::<PathBuf>("inventory-file"),
        sub.get_one::<PathBuf>("history-file"),
    ) {
        (Some(inv), Some(hist)) => Box::new(FileSource {
            inventory: Some(inv.clone()),
            sale_history: Some(hist.clone()),
        }),
        _ => Box::new(http_source(conn, sub)?),
    };
    let rows = diagnose(&src.inventory()?, &src.sale_history()?);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!(
            "{}",
            pretty_table(&["Snapshot", "Index", "Record", "Issue"], rows)
        );
    }
    Ok(())
}

/// One row per record that the aggregators would leave out.
pub fn diagnose(inventory: &[InventoryRecord], history: &[SaleRecord]) -> Vec<Vec<String>> {
    let inv = aggregate(inventory).skipped;
    let hist = apply_query(history, "").skipped;
    let row = |snapshot: &str, m: MalformedRecord| {
        vec![
            snapshot.to_string(),
            m.index.to_string(),
            m.label.unwrap_or_else(|| "(unnamed)".into()),
            m.error.to_string(),
        ]
    };
    inv.into_iter()
        .map(|m| row("inventory", m))
        .chain(hist.into_iter().map(|m| row("sale_history", m)))
        .collect()
}
