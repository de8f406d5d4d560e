// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Backend synchronization.
//!
//! `PersistenceClient` turns records into request URLs and keeps them in an
//! outbox. Nothing is sent until the owner calls `flush` with a
//! `Transport`; every queued request is then delivered once, in order, and
//! its decoded response is handed back. There is no retry, timeout or
//! de-duplication: a request that fails is reported and dropped.

mod error;
mod transport;
mod wire;

pub use error::PersistenceError;
pub use transport::{HttpTransport, Transport};
pub use wire::{Operation, Response, decode_response, encode_load_query, encode_record_query};

#[cfg(test)]
pub(crate) use transport::ScriptedTransport;

use crate::model::{EntityId, GeometryRecord};
use std::collections::VecDeque;

/// A request waiting in the outbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: Operation,
    pub url: String,
    /// Entity that issued the request, if any
    pub origin: Option<EntityId>,
}

/// A request together with what came back for it
#[derive(Debug)]
pub struct Delivery {
    pub request: Request,
    pub outcome: Result<Response, PersistenceError>,
}

/// Builds requests against one backend endpoint
#[derive(Debug, Clone)]
pub struct PersistenceClient {
    base_url: String,
    outbox: VecDeque<Request>,
}

impl PersistenceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            outbox: VecDeque::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Queue a load of every stored record
    pub fn queue_load(&mut self) {
        self.push(Operation::Get, encode_load_query(), None);
    }

    /// Queue an add, edit or delete of `record` on behalf of `origin`
    pub fn queue_record(&mut self, operation: Operation, record: &GeometryRecord, origin: EntityId) {
        self.push(operation, encode_record_query(operation, record), Some(origin));
    }

    /// Requests not yet delivered, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &Request> {
        self.outbox.iter()
    }

    pub fn has_pending(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Deliver every queued request through `transport`
    pub fn flush(&mut self, transport: &mut impl Transport) -> Vec<Delivery> {
        let mut deliveries = Vec::with_capacity(self.outbox.len());
        while let Some(request) = self.outbox.pop_front() {
            let outcome = transport
                .get(&request.url)
                .and_then(|body| decode_response(&body));
            if let Err(e) = &outcome {
                tracing::warn!("{} request dropped: {}", request.operation, e);
            }
            deliveries.push(Delivery { request, outcome });
        }
        deliveries
    }

    fn push(&mut self, operation: Operation, query: String, origin: Option<EntityId>) {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let url = format!("{}{}{}", self.base_url, separator, query);
        tracing::debug!("queued {} request", operation);
        self.outbox.push_back(Request {
            operation,
            url,
            origin,
        });
    }
}
