// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::UnitPrice;

const UA: &str = concat!(
    "giribazar/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/giribazar)"
);

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const BASE_URL_ENV: &str = "GIRIBAZAR_BASE_URL";

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn fmt_unit_price(p: &UnitPrice) -> String {
    match p.value() {
        Some(v) => fmt_amount(&v),
        None => "n/a".to_string(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn normalize_base_url(raw: &str) -> Result<String> {
    let s = raw.trim().trim_end_matches('/');
    if !(s.starts_with("http://") || s.starts_with("https://")) {
        return Err(anyhow!("Invalid base URL '{}', expected http(s)://host[:port]", raw));
    }
    Ok(s.to_string())
}

pub fn stored_base_url(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "base_url")?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
}

pub fn set_base_url(conn: &Connection, url: &str) -> Result<String> {
    let url = normalize_base_url(url)?;
    set_setting(conn, "base_url", &url)?;
    Ok(url)
}

/// Server base URL: the `--base-url` flag, then `GIRIBAZAR_BASE_URL`, then the stored setting.
pub fn resolve_base_url(conn: &Connection, flag: Option<&str>) -> Result<String> {
    if let Some(f) = flag {
        return normalize_base_url(f).context("--base-url");
    }
    if let Ok(env) = std::env::var(BASE_URL_ENV) {
        if !env.trim().is_empty() {
            return normalize_base_url(&env).with_context(|| format!("${}", BASE_URL_ENV));
        }
    }
    stored_base_url(conn)
}
