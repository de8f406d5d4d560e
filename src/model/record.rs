// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Stored geometry records and the lat/lng primitives they are built from.
//!
//! `GeometryRecord` is the shape the backend stores and returns. Field names
//! follow the wire (`userId`, `timeStamp`, `type`), so the same struct is
//! used for decoding load responses and for flattening save requests.
//! Bounding boxes are kept in a `kurbo::Rect` with longitude on the x axis
//! and latitude on the y axis.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

// ============================================================================
// LAT/LNG
// ============================================================================

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Plane point with longitude as x and latitude as y
    pub fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point.y, point.x)
    }
}

/// Axis-aligned lat/lng bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    rect: Rect,
}

impl LatLngBounds {
    /// Bounds spanning two corners (in any order)
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            rect: Rect::from_points(south_west.to_point(), north_east.to_point()),
        }
    }

    /// Smallest bounds containing every position, `None` when empty
    pub fn from_positions(positions: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut positions = positions.into_iter();
        let first = positions.next()?;
        let mut bounds = Self::new(first, first);
        for position in positions {
            bounds.extend(position);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, position: LatLng) {
        self.rect = self.rect.union_pt(position.to_point());
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.rect.y0, self.rect.x0)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.rect.y1, self.rect.x1)
    }

    pub fn center(&self) -> LatLng {
        LatLng::from_point(self.rect.center())
    }

    /// Latitude/longitude extent as a `LatLng` (lat span, lng span)
    pub fn span(&self) -> LatLng {
        LatLng::new(self.rect.height(), self.rect.width())
    }
}

// ============================================================================
// GEOMETRY KIND
// ============================================================================

/// Geometry type of a record
///
/// Each variant carries its own coordinate-count and overlay rules so the
/// rest of the crate never branches on the wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    #[serde(rename = "point")]
    Point,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "poly", alias = "polygon")]
    Polygon,
}

impl GeometryKind {
    /// Name used on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "poly",
        }
    }

    /// Lines and polygons are edited through vertex markers
    pub fn has_vertex_markers(self) -> bool {
        !matches!(self, GeometryKind::Point)
    }

    /// Check the coordinate count this kind requires
    pub fn validate(self, coordinates: &[LatLng]) -> Result<(), String> {
        match (self, coordinates.len()) {
            (GeometryKind::Point, 1) => Ok(()),
            (GeometryKind::Point, n) => Err(format!("point needs exactly 1 coordinate, got {n}")),
            (_, 0) => Err(format!("{} needs at least 1 coordinate", self.wire_name())),
            _ => Ok(()),
        }
    }

    /// Position the map centers on and fits to for this kind
    ///
    /// The point itself for a Point, the bounding-box center otherwise.
    pub fn representative_point(self, coordinates: &[LatLng]) -> Option<LatLng> {
        match self {
            GeometryKind::Point => coordinates.first().copied(),
            GeometryKind::Line | GeometryKind::Polygon => {
                LatLngBounds::from_positions(coordinates.iter().copied()).map(|b| b.center())
            }
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A stored geometry as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Server-assigned key; `None` until the record has been added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(
        rename = "timeStamp",
        alias = "timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<LatLng>,
}

impl GeometryRecord {
    /// A fresh, unsaved record owned by `user_id`
    pub fn new(kind: GeometryKind, user_id: impl Into<String>, coordinates: Vec<LatLng>) -> Self {
        Self {
            key: None,
            kind,
            name: String::new(),
            description: String::new(),
            user_id: user_id.into(),
            timestamp: None,
            coordinates,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.key.is_some()
    }

    pub fn is_owned_by(&self, user: &str) -> bool {
        self.user_id == user
    }

    pub fn validate(&self) -> Result<(), String> {
        self.kind.validate(&self.coordinates)
    }

    pub fn representative_point(&self) -> Option<LatLng> {
        self.kind.representative_point(&self.coordinates)
    }
}
