// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Request query encoding and response decoding.
//!
//! Records are sent as flat query strings. Scalar fields become
//! `field=value` pairs and the coordinate list is flattened by repeating
//! `lat=..&lng=..` once per vertex, in vertex order. Nothing in the query
//! marks where one coordinate ends and the next begins; the server rebuilds
//! the list positionally. The format is kept byte-compatible with existing
//! backends, it is not a structured encoding.

use super::PersistenceError;
use crate::model::GeometryRecord;
use crate::settings;
use serde::Deserialize;
use std::fmt;

// ============================================================================
// OPERATIONS
// ============================================================================

/// Backend operation carried in the `operation` query field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Add,
    Edit,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "get" => Some(Operation::Get),
            "add" => Some(Operation::Add),
            "edit" => Some(Operation::Edit),
            "delete" => Some(Operation::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ENCODING
// ============================================================================

/// Query for loading every stored record
pub fn encode_load_query() -> String {
    format!(
        "operation={}&output={}",
        Operation::Get,
        settings::backend::LOAD_OUTPUT_FORMAT
    )
}

/// Flattened query for an add, edit or delete of `record`
pub fn encode_record_query(operation: Operation, record: &GeometryRecord) -> String {
    let mut params = vec![format!("operation={operation}")];

    if let Some(key) = &record.key {
        push_field(&mut params, "key", key);
    }
    push_field(&mut params, "type", record.kind.wire_name());
    push_field(&mut params, "name", &record.name);
    push_field(&mut params, "description", &record.description);
    push_field(&mut params, "userId", &record.user_id);
    if let Some(timestamp) = &record.timestamp {
        push_field(&mut params, "timeStamp", timestamp);
    }

    // Duplicate keys on purpose: one lat/lng pair per vertex
    for coordinate in &record.coordinates {
        push_field(&mut params, "lat", &coordinate.lat.to_string());
        push_field(&mut params, "lng", &coordinate.lng.to_string());
    }

    params.join("&")
}

fn push_field(params: &mut Vec<String>, name: &str, value: &str) {
    params.push(format!("{name}={}", urlencoding::encode(value)));
}

// ============================================================================
// DECODING
// ============================================================================

/// A decoded response whose status was `success`
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub status: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    result: Option<ResponseResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseResult {
    #[serde(default)]
    geometries: Option<GeometryList>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeometryList {
    #[serde(default)]
    records: Vec<serde_json::Value>,
}

impl Response {
    pub fn operation(&self) -> Option<Operation> {
        Operation::from_wire(&self.operation)
    }

    /// Number of records carried in the result, valid or not
    pub fn record_count(&self) -> usize {
        self.raw_records().len()
    }

    /// Every carried record, decoded and validated one by one
    ///
    /// A bad record does not spoil the others.
    pub fn records(&self) -> Vec<Result<GeometryRecord, PersistenceError>> {
        self.raw_records().iter().map(decode_record).collect()
    }

    fn raw_records(&self) -> &[serde_json::Value] {
        self.result
            .as_ref()
            .and_then(|result| result.geometries.as_ref())
            .map(|list| list.records.as_slice())
            .unwrap_or(&[])
    }
}

fn decode_record(value: &serde_json::Value) -> Result<GeometryRecord, PersistenceError> {
    let record = GeometryRecord::deserialize(value)
        .map_err(|e| PersistenceError::MalformedRecord(e.to_string()))?;
    record.validate().map_err(|reason| {
        let name = if record.name.is_empty() {
            record.key.clone().unwrap_or_default()
        } else {
            record.name.clone()
        };
        PersistenceError::MalformedRecord(format!("{name}: {reason}"))
    })?;
    Ok(record)
}

/// Parse a response body, keeping only `success` payloads
pub fn decode_response(body: &str) -> Result<Response, PersistenceError> {
    let response: Response = serde_json::from_str(body)?;
    if response.status != "success" {
        return Err(PersistenceError::ServerRejected {
            operation: response.operation,
            status: response.status,
        });
    }
    Ok(response)
}
