// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Persistence error kinds

use thiserror::Error;

/// Why a request or one of its records could not be applied
///
/// None of these are retried. The panel logs them and shows them on the
/// status line; local state is never rolled back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The request never produced a 200 response
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The server answered with a status other than `success`
    #[error("server rejected {operation}: {status}")]
    ServerRejected { operation: String, status: String },

    /// A record violates the coordinate rules of its kind
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The body is not the expected JSON payload
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        PersistenceError::TransportFailure(err.to_string())
    }
}
