// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use giribazar::session::{self, Session};
use giribazar::{db, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn base_url_defaults_then_persists_normalized() {
    let conn = setup();
    assert_eq!(utils::stored_base_url(&conn).unwrap(), utils::DEFAULT_BASE_URL);
    let stored = utils::set_base_url(&conn, " http://192.168.0.109:3000/ ").unwrap();
    assert_eq!(stored, "http://192.168.0.109:3000");
    assert_eq!(utils::stored_base_url(&conn).unwrap(), stored);
}

#[test]
fn base_url_flag_takes_precedence() {
    let conn = setup();
    utils::set_base_url(&conn, "http://stored:3000").unwrap();
    let url = utils::resolve_base_url(&conn, Some("https://flag.example/")).unwrap();
    assert_eq!(url, "https://flag.example");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let conn = setup();
    assert!(utils::set_base_url(&conn, "192.168.0.109:3000").is_err());
}

#[test]
fn session_round_trips_and_clears() {
    let conn = setup();
    assert!(session::load(&conn).unwrap().is_none());

    let s = Session {
        username: "ravi".into(),
        token: Some("abc".into()),
        role: Some("seller".into()),
        user_id: Some("7".into()),
    };
    session::save(&conn, &s).unwrap();
    let replaced = Session {
        token: Some("def".into()),
        ..s.clone()
    };
    session::save(&conn, &replaced).unwrap();
    assert_eq!(session::load(&conn).unwrap(), Some(replaced));

    assert!(session::clear(&conn).unwrap());
    assert!(!session::clear(&conn).unwrap());
    assert!(session::load(&conn).unwrap().is_none());
}
