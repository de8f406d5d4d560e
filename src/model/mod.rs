// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry data model

pub mod entity_id;
pub mod record;

pub use entity_id::{EntityId, OverlayId};
pub use record::{GeometryKind, GeometryRecord, LatLng, LatLngBounds};
