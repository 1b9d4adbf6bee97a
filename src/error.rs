// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use thiserror::Error;

/// Why a single fetched record could not take part in a sum.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid number '{raw}' in field '{field}'")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("negative quantity '{raw}'")]
    NegativeQuantity { raw: String },

    #[error("'{field}' overflows the running total")]
    Overflow { field: &'static str },
}

/// Failures of the login exchange.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("login rejected for user '{0}'")]
    LoginRejected(String),

    #[error("username and password are required")]
    MissingCredentials,
}
