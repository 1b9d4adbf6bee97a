// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod doctor;
pub mod exporter;
pub mod history;
pub mod inventory;
pub mod session;
pub mod settings;

use crate::source::{FileSource, HttpSource, RecordSource};
use crate::utils::{http_client, resolve_base_url};
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

/// Network source for `--base-url` (or the configured server), sending the stored token.
pub(crate) fn http_source(conn: &Connection, sub: &clap::ArgMatches) -> Result<HttpSource> {
    let flag = sub.get_one::<String>("base-url").map(|s| s.as_str());
    let base = resolve_base_url(conn, flag)?;
    let token = crate::session::load(conn)?.and_then(|s| s.token);
    Ok(HttpSource::new(http_client()?, &base, token))
}

/// `--file` wins over the network for commands that read a single snapshot.
pub(crate) fn source_for(
    conn: &Connection,
    sub: &clap::ArgMatches,
    inventory: bool,
) -> Result<Box<dyn RecordSource>> {
    if let Some(path) = sub.get_one::<PathBuf>("file") {
        let mut src = FileSource::default();
        if inventory {
            src.inventory = Some(path.clone());
        } else {
            src.sale_history = Some(path.clone());
        }
        return Ok(Box::new(src));
    }
    Ok(Box::new(http_source(conn, sub)?))
}

pub(crate) fn report_skipped(count: usize) {
    if count > 0 {
        eprintln!(
            "warning: {} record(s) could not be read and were left out; run `giribazar doctor` for details",
            count
        );
    }
}
