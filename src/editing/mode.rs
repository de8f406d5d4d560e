// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing modes

use crate::model::GeometryKind;

/// Panel-wide drawing mode, chosen from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Select existing geometries
    #[default]
    View,
    /// Place a marker
    Point,
    /// Draw a polyline
    Line,
    /// Draw a filled polygon
    Poly,
}

impl Mode {
    /// All modes in toolbar order
    pub const ALL: [Mode; 4] = [Mode::View, Mode::Point, Mode::Line, Mode::Poly];

    /// Kind of geometry a click on the empty map creates, if any
    pub fn creates(self) -> Option<GeometryKind> {
        match self {
            Mode::View => None,
            Mode::Point => Some(GeometryKind::Point),
            Mode::Line => Some(GeometryKind::Line),
            Mode::Poly => Some(GeometryKind::Polygon),
        }
    }

    /// What the user should do next, shown on the status line
    pub fn status_text(self) -> &'static str {
        match self {
            Mode::View => "Select geometries by clicking on them.",
            Mode::Point => "Click on the map to create a new marker.",
            Mode::Line => "Click on the map to start creating a new line.",
            Mode::Poly => "Click on the map to start creating a new filled poly.",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::View => "view",
            Mode::Point => "point",
            Mode::Line => "line",
            Mode::Poly => "poly",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}
