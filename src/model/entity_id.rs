// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Unique identifiers for geometry entities and map overlays.
//!
//! Each id is a monotonically increasing `u64` drawn from a global atomic
//! counter. Entity ids key the panel's collection and the sidebar entries;
//! overlay ids are the handles a map surface hands out for markers,
//! polylines and polygons. Neither is ever reused within a session, so a
//! deleted geometry leaves no dangling handle that could match a newer one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a geometry entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Create a new unique entity ID
    pub fn next() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::next()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an overlay living on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(u64);

static OVERLAY_COUNTER: AtomicU64 = AtomicU64::new(1);

impl OverlayId {
    /// Create a new unique overlay handle
    pub fn next() -> Self {
        Self(OVERLAY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}
