// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Outbound GET transport

use super::PersistenceError;
use reqwest::StatusCode;

/// Delivers a GET request and hands back the response body
///
/// Anything other than a 200 response is a `TransportFailure`.
pub trait Transport {
    fn get(&mut self, url: &str) -> Result<String, PersistenceError>;
}

/// Blocking HTTP transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn get(&mut self, url: &str) -> Result<String, PersistenceError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(PersistenceError::TransportFailure(format!(
                "HTTP {status} from {url}"
            )));
        }
        Ok(response.text()?)
    }
}

/// Transport that records requests and answers from a script
///
/// Unscripted requests get a bare success acknowledgment for their
/// operation.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    pub requests: Vec<String>,
    pub responses: std::collections::VecDeque<Result<String, String>>,
}

#[cfg(test)]
impl ScriptedTransport {
    pub fn respond(&mut self, body: impl Into<String>) {
        self.responses.push_back(Ok(body.into()));
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.responses.push_back(Err(reason.into()));
    }
}

#[cfg(test)]
impl Transport for ScriptedTransport {
    fn get(&mut self, url: &str) -> Result<String, PersistenceError> {
        self.requests.push(url.to_string());
        match self.responses.pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(reason)) => Err(PersistenceError::TransportFailure(reason)),
            None => {
                let operation = url
                    .split(['?', '&'])
                    .find_map(|pair| pair.strip_prefix("operation="))
                    .unwrap_or("");
                Ok(format!(
                    r#"{{"status": "success", "operation": "{operation}"}}"#
                ))
            }
        }
    }
}
