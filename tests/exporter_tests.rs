// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use giribazar::{cli, commands::exporter, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["giribazar", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_inventory_csv_leaves_unit_price_blank_for_zero_stock() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let snap = dir.path().join("inv.json");
    std::fs::write(
        &snap,
        r#"[{"category":"Veg","product":"Tomato","quantity":"2","price":"40"},
            {"category":"Veg","product":"Onion","quantity":"0","price":"10"}]"#,
    )
    .unwrap();
    let out = dir.path().join("inv.csv");

    run_export(
        &conn,
        &[
            "inventory",
            "--file",
            snap.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ],
    );

    let body = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "category,product,quantity,price_per_unit,total_price");
    assert_eq!(lines[1], "Veg,Tomato,2,20.00,40.00");
    assert_eq!(lines[2], "Veg,Onion,0,,10.00");
}

#[test]
fn export_history_json_keeps_query_and_total() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let snap = dir.path().join("hist.json");
    std::fs::write(
        &snap,
        r#"[{"name":"Rice","category":"Grain","quantity":"1","price":"50"},
            {"name":"Wheat","category":"Grain","quantity":"1","price":"30"}]"#,
    )
    .unwrap();
    let out = dir.path().join("hist.json.out");

    run_export(
        &conn,
        &[
            "history",
            "--file",
            snap.to_str().unwrap(),
            "--query",
            "wheat",
            "--format",
            "JSON",
            "--out",
            out.to_str().unwrap(),
        ],
    );

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["query"], "wheat");
    assert_eq!(v["total"], "30.00");
    assert_eq!(v["items"].as_array().unwrap().len(), 1);
    assert_eq!(v["items"][0]["product"], "Wheat");
}

#[test]
fn unknown_format_is_an_error() {
    let conn = base_conn();
    let matches = cli::build_cli().get_matches_from([
        "giribazar", "export", "inventory", "--file", "x.json", "--format", "xml", "--out", "y",
    ]);
    let (_, export_m) = matches.subcommand().unwrap();
    assert!(exporter::handle(&conn, export_m).is_err());
}
