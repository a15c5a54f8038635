// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure raised by a budget or expense provider while reading its store.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Document store returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Could not decode stored record: {0}")]
    Decode(String),
    #[error("{0}")]
    Invalid(String),
}

/// The only error the health calculator surfaces to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DatabaseError {
    pub message: String,
}

impl DatabaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ProviderError> for DatabaseError {
    fn from(e: ProviderError) -> Self {
        DatabaseError::new(e.to_string())
    }
}
