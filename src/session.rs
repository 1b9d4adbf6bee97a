// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SessionError;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
    pub token: Option<String>,
    pub role: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub role: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<serde_json::Value>,
}

impl LoginResponse {
    /// Turn the server's answer into a session for `requested` (the name typed at login).
    pub fn into_session(self, requested: &str) -> Result<Session, SessionError> {
        if !self.success {
            return Err(SessionError::LoginRejected(requested.to_string()));
        }
        let user_id = self.user_id.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        });
        Ok(Session {
            username: self.username.unwrap_or_else(|| requested.to_string()),
            token: self.token,
            role: self.role,
            user_id,
        })
    }
}

pub fn login(
    client: &reqwest::blocking::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<Session> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(SessionError::MissingCredentials.into());
    }
    let url = format!("{}/login", base_url);
    tracing::debug!(%url, username, "logging in");
    let resp: LoginResponse = client
        .post(&url)
        .json(&LoginRequest { username, password })
        .send()
        .with_context(|| format!("POST {}", url))?
        .json()
        .context("Invalid login response")?;
    let session = resp.into_session(username)?;
    tracing::info!(username = %session.username, role = ?session.role, "logged in");
    Ok(session)
}

pub fn save(conn: &Connection, s: &Session) -> Result<()> {
    conn.execute(
        "INSERT INTO session(id, token, role, username, user_id) VALUES (1, ?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET token=excluded.token, role=excluded.role,
           username=excluded.username, user_id=excluded.user_id, created_at=datetime('now')",
        params![s.token, s.role, s.username, s.user_id],
    )?;
    Ok(())
}

pub fn load(conn: &Connection) -> Result<Option<Session>> {
    let s = conn
        .query_row(
            "SELECT username, token, role, user_id FROM session WHERE id=1",
            [],
            |r| {
                Ok(Session {
                    username: r.get(0)?,
                    token: r.get(1)?,
                    role: r.get(2)?,
                    user_id: r.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(s)
}

/// Forget the stored login. Returns whether one existed.
pub fn clear(conn: &Connection) -> Result<bool> {
    let n = conn.execute("DELETE FROM session", [])?;
    if n > 0 {
        tracing::info!("session cleared");
    }
    Ok(n > 0)
}
