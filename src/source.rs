// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where snapshots come from: the store's REST endpoints or JSON files on disk.

use crate::models::{InventoryRecord, SaleRecord};
use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub const INVENTORY_PATH: &str = "/getProductInventory";
pub const SALE_HISTORY_PATH: &str = "/getSaleHistory";

pub trait RecordSource {
    fn inventory(&self) -> Result<Vec<InventoryRecord>>;
    fn sale_history(&self) -> Result<Vec<SaleRecord>>;
}

/// Decode a snapshot body. Anything but a JSON array is rejected outright.
pub fn parse_snapshot<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let v: serde_json::Value = serde_json::from_str(body).context("Response is not valid JSON")?;
    if !v.is_array() {
        return Err(anyhow!("Invalid response format: expected a JSON array"));
    }
    serde_json::from_value(v).context("Invalid record in snapshot")
}

pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(client: reqwest::blocking::Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "fetching snapshot");
        let mut req = self.client.get(&url);
        if let Some(t) = &self.token {
            req = req.bearer_auth(t);
        }
        let body = req
            .send()
            .with_context(|| format!("GET {}", url))?
            .error_for_status()?
            .text()?;
        let records = parse_snapshot(&body).with_context(|| format!("GET {}", url))?;
        tracing::debug!(%url, count = records.len(), "snapshot fetched");
        Ok(records)
    }
}

impl RecordSource for HttpSource {
    fn inventory(&self) -> Result<Vec<InventoryRecord>> {
        self.get(INVENTORY_PATH)
    }

    fn sale_history(&self) -> Result<Vec<SaleRecord>> {
        self.get(SALE_HISTORY_PATH)
    }
}

/// Reads the same JSON bodies the endpoints return from local files.
#[derive(Debug, Default)]
pub struct FileSource {
    pub inventory: Option<PathBuf>,
    pub sale_history: Option<PathBuf>,
}

impl FileSource {
    fn read<T: DeserializeOwned>(path: Option<&PathBuf>, what: &str) -> Result<Vec<T>> {
        let path = path.with_context(|| format!("No {} snapshot file given", what))?;
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Read {}", path.display()))?;
        parse_snapshot(&body).with_context(|| format!("Parse {}", path.display()))
    }
}

impl RecordSource for FileSource {
    fn inventory(&self) -> Result<Vec<InventoryRecord>> {
        Self::read(self.inventory.as_ref(), "inventory")
    }

    fn sale_history(&self) -> Result<Vec<SaleRecord>> {
        Self::read(self.sale_history.as_ref(), "sale history")
    }
}
