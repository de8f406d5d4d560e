// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Map surface abstraction.
//!
//! The panel never draws anything itself: it asks a `MapSurface` to add and
//! remove overlays, toggle marker dragging and move the viewport. The map
//! reports user interaction back as `MapEvent`s, which the panel routes in
//! `AdminPanel::handle_map_event`. `HeadlessMap` is an in-memory surface used
//! by the command-line driver and by the tests.

mod headless;

pub use headless::HeadlessMap;

use crate::model::{LatLng, LatLngBounds, OverlayId};
use crate::theme;
use peniko::Color;

// ============================================================================
// OVERLAYS
// ============================================================================

/// Stroke and fill of a polyline or polygon overlay
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub stroke: Color,
    pub stroke_weight: f64,
    pub opacity: f32,
    pub fill: Option<Color>,
    /// Whether clicks on this overlay are reported as overlay clicks
    pub clickable: bool,
}

impl OverlayStyle {
    /// Faint shape underneath an editable line
    pub fn primary_line() -> Self {
        Self {
            stroke: theme::overlay::PRIMARY_STROKE,
            stroke_weight: 0.0,
            opacity: 0.1,
            fill: None,
            clickable: true,
        }
    }

    /// Faint shape underneath an editable polygon
    pub fn primary_polygon() -> Self {
        Self {
            fill: Some(theme::overlay::PRIMARY_STROKE),
            ..Self::primary_line()
        }
    }

    /// Connecting line drawn through the vertex markers
    pub fn editable_line() -> Self {
        Self {
            stroke: theme::overlay::LINE_STROKE,
            stroke_weight: 2.0,
            opacity: 0.7,
            fill: None,
            clickable: false,
        }
    }

    /// Filled shape drawn through the vertex markers
    pub fn editable_polygon() -> Self {
        Self {
            stroke: theme::overlay::POLYGON_STROKE,
            stroke_weight: 2.0,
            opacity: 0.7,
            fill: Some(theme::overlay::POLYGON_FILL),
            clickable: false,
        }
    }

    /// Selection indicator, tinted by dirty state
    pub fn highlight(is_edited: bool) -> Self {
        let color = if is_edited {
            theme::highlight::DIRTY
        } else {
            theme::highlight::CLEAN
        };
        Self {
            stroke: color,
            stroke_weight: 0.0,
            opacity: theme::highlight::OPACITY,
            fill: Some(color),
            clickable: false,
        }
    }
}

/// An overlay primitive the map surface can draw
#[derive(Debug, Clone)]
pub enum Overlay {
    Marker { position: LatLng, draggable: bool },
    Polyline { path: Vec<LatLng>, style: OverlayStyle },
    Polygon { path: Vec<LatLng>, style: OverlayStyle },
}

impl Overlay {
    /// The positions this overlay is drawn through
    pub fn path(&self) -> &[LatLng] {
        match self {
            Overlay::Marker { position, .. } => std::slice::from_ref(position),
            Overlay::Polyline { path, .. } | Overlay::Polygon { path, .. } => path,
        }
    }
}

// ============================================================================
// SURFACE
// ============================================================================

/// Operations the panel needs from a map provider
pub trait MapSurface {
    /// Draw an overlay and return its handle
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId;

    /// Remove an overlay; unknown handles are ignored
    fn remove_overlay(&mut self, id: OverlayId);

    /// Enable or disable dragging of a marker
    fn set_draggable(&mut self, id: OverlayId, draggable: bool);

    /// Current position of a marker (it may have been dragged)
    fn marker_position(&self, id: OverlayId) -> Option<LatLng>;

    /// Move a marker programmatically
    fn set_marker_position(&mut self, id: OverlayId, position: LatLng);

    /// Visible viewport
    fn bounds(&self) -> LatLngBounds;

    fn set_center(&mut self, center: LatLng);

    fn zoom(&self) -> u8;

    fn set_zoom(&mut self, zoom: u8);

    /// Deepest zoom level at which `bounds` fits in the viewport
    fn bounds_zoom_level(&self, bounds: &LatLngBounds) -> u8;
}

// ============================================================================
// EVENTS
// ============================================================================

/// User interaction reported by the map surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Click on the map; `overlay` is set when an overlay was hit
    Click {
        overlay: Option<OverlayId>,
        at: LatLng,
    },
    /// The viewport zoom changed
    ZoomEnd,
    /// A marker (point or vertex) was released after dragging
    DragEnd { overlay: OverlayId },
    /// Native multi-point drawing added a vertex to a line or polygon
    VertexAppended { overlay: OverlayId, at: LatLng },
    /// Native drawing changed a line or polygon in place
    LineUpdated { overlay: OverlayId },
    /// Native drawing of a line or polygon finished
    EndLine { overlay: OverlayId },
}
