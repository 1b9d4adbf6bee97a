// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{BASE_URL_ENV, pretty_table, resolve_base_url, set_base_url, stored_base_url};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base-url", sub)) => {
            let url = sub.get_one::<String>("url").context("url missing")?;
            let url = set_base_url(conn, url)?;
            println!("Base URL set to {}", url);
        }
        Some(("show", _)) => {
            let rows = vec![
                vec!["stored base_url".to_string(), stored_base_url(conn)?],
                vec![
                    format!("${}", BASE_URL_ENV),
                    std::env::var(BASE_URL_ENV).unwrap_or_default(),
                ],
                vec!["effective base_url".to_string(), resolve_base_url(conn, None)?],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
