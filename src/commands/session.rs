// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::{self, Session};
use crate::utils::{http_client, pretty_table, resolve_base_url};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").context("username missing")?;
    let password = sub.get_one::<String>("password").context("password missing")?;
    let flag = sub.get_one::<String>("base-url").map(|s| s.as_str());
    let base = resolve_base_url(conn, flag)?;
    let s = session::login(&http_client()?, &base, username, password)?;
    session::save(conn, &s)?;
    println!("Logged in as {}", s.username);
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    if session::clear(conn)? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    match session::load(conn)? {
        Some(s) => println!("{}", pretty_table(&["Field", "Value"], session_rows(&s))),
        None => println!("Not logged in"),
    }
    Ok(())
}

fn session_rows(s: &Session) -> Vec<Vec<String>> {
    vec![
        vec!["username".into(), s.username.clone()],
        vec!["role".into(), s.role.clone().unwrap_or_default()],
        vec!["user_id".into(), s.user_id.clone().unwrap_or_default()],
        vec![
            "token".into(),
            if s.token.is_some() { "stored" } else { "none" }.into(),
        ],
    ]
}
