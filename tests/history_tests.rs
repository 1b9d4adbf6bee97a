// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use giribazar::history::{HistoryFilter, apply_query};
use giribazar::models::SaleRecord;
use giribazar::{cli, commands::history, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn rice_query_returns_only_rice() {
    let recs = vec![
        SaleRecord::new("Rice", "Grain", "1", "50"),
        SaleRecord::new("Wheat", "Grain", "1", "30"),
    ];
    let v = apply_query(&recs, "rice");
    assert_eq!(v.len(), 1);
    assert!(std::ptr::eq(v.items[0], &recs[0]));
    assert_eq!(v.total, Decimal::from(50));
}

#[test]
fn repeated_queries_are_stable() {
    let mut f = HistoryFilter::new(vec![
        SaleRecord::new("Rice", "Grain", "1", "50"),
        SaleRecord::new("Tomato", "Veg", "1", "20"),
    ]);
    let first = f.set_query("veg").total;
    let second = f.set_query("veg").total;
    assert_eq!(first, second);
    assert_eq!(f.set_query("").total, Decimal::from(70));
}

#[test]
fn list_reads_snapshot_and_formats_rows() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"name":"Rice","category":"Grain","quantity":"2","price":"50","created_at":"2024-05-01T10:30:00Z"}},
            {{"name":"Wheat","category":"Grain","quantity":"1","price":"oops"}},
            {{"category":"Grain","quantity":"1","price":"5"}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "giribazar", "history", "list", "--file", &path, "--query", "GRAIN",
    ]);
    let (_, h_m) = matches.subcommand().unwrap();
    let Some(("list", list_m)) = h_m.subcommand() else {
        panic!("no list subcommand");
    };
    let records = history::load_history(&conn, list_m).unwrap();
    let view = apply_query(&records, list_m.get_one::<String>("query").unwrap());

    assert_eq!(view.len(), 3);
    assert_eq!(view.total, Decimal::from(55));
    assert_eq!(view.skipped.len(), 1);

    let rows = history::sale_rows(&view);
    assert_eq!(rows[0].price, "50.00");
    assert_eq!(rows[0].date, "2024-05-01 10:30");
    assert_eq!(rows[1].price, "oops");
    assert_eq!(rows[2].product, "");
}

#[test]
fn list_handler_runs_against_snapshot_file() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{"name":"Rice","category":"Grain","price":"50"}}]"#).unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "giribazar", "history", "list", "--file", &path, "--query", " ",
    ]);
    let Some(("history", h_m)) = matches.subcommand() else {
        panic!("no history subcommand");
    };
    history::handle(&conn, h_m).unwrap();
}
