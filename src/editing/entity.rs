// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! A geometry record plus its live overlays and editing flags.
//!
//! A Point is drawn as a single marker that becomes draggable while it is
//! edited. Lines and polygons get two overlays: a faint primary shape that
//! reflects the stored coordinates, and an editable shape drawn through an
//! arena of vertex markers, one per coordinate and in the same order. When
//! a vertex marker is dropped the editable shape is removed and rebuilt
//! from the current marker positions; the markers themselves are reused.

use crate::map::{MapSurface, Overlay, OverlayStyle};
use crate::model::{EntityId, GeometryKind, GeometryRecord, LatLng, LatLngBounds, OverlayId};

/// Overlays used to edit a line or polygon
#[derive(Debug, Clone, PartialEq)]
struct EditableShape {
    overlay: OverlayId,
    /// Index-aligned with the record's coordinates
    vertex_markers: Vec<OverlayId>,
}

/// Lifecycle stage, derived from the entity's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No add has been queued yet; cancelling abandons it
    Unsaved,
    /// Stored, with edit affordances enabled
    Editable,
    /// Stored and shown read-only
    Viewing,
}

impl Lifecycle {
    pub fn name(self) -> &'static str {
        match self {
            Lifecycle::Unsaved => "unsaved",
            Lifecycle::Editable => "editing",
            Lifecycle::Viewing => "viewing",
        }
    }
}

/// A stored geometry with its map overlays
#[derive(Debug, Clone)]
pub struct GeometryEntity {
    pub id: EntityId,
    pub record: GeometryRecord,
    /// Dirty since the last save
    pub is_edited: bool,
    /// Edit affordances currently enabled
    pub is_editable: bool,
    /// Vertex collection complete; always true for points
    pub has_ended: bool,
    owned: bool,
    save_requested: bool,
    primary: OverlayId,
    shape: Option<EditableShape>,
}

impl GeometryEntity {
    /// Draw `record` on the map
    ///
    /// `is_new` marks geometry the current user is creating right now; it
    /// starts dirty and, for lines and polygons, still collecting vertices.
    pub fn create(
        record: GeometryRecord,
        current_user: &str,
        is_new: bool,
        map: &mut impl MapSurface,
    ) -> Self {
        let owned = record.is_owned_by(current_user);
        let kind = record.kind;
        let primary = map.add_overlay(primary_overlay(kind, &record.coordinates));

        let shape = kind.has_vertex_markers().then(|| {
            let vertex_markers = record
                .coordinates
                .iter()
                .map(|&position| {
                    map.add_overlay(Overlay::Marker {
                        position,
                        draggable: false,
                    })
                })
                .collect();
            let overlay = map.add_overlay(editable_overlay(kind, record.coordinates.clone()));
            EditableShape {
                overlay,
                vertex_markers,
            }
        });

        let is_new = is_new && owned;
        Self {
            id: EntityId::next(),
            record,
            is_edited: is_new,
            is_editable: false,
            has_ended: !is_new || kind == GeometryKind::Point,
            owned,
            save_requested: false,
            primary,
            shape,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.record.kind
    }

    /// Whether the current user owns this geometry
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Whether an add or edit has ever been queued for this geometry
    fn was_saved(&self) -> bool {
        self.save_requested || self.record.is_saved()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if !self.was_saved() {
            Lifecycle::Unsaved
        } else if self.is_editable {
            Lifecycle::Editable
        } else {
            Lifecycle::Viewing
        }
    }

    pub fn primary_overlay(&self) -> OverlayId {
        self.primary
    }

    /// Handles of the vertex markers, in coordinate order
    pub fn vertex_markers(&self) -> &[OverlayId] {
        self.shape
            .as_ref()
            .map(|shape| shape.vertex_markers.as_slice())
            .unwrap_or(&[])
    }

    pub fn editable_overlay(&self) -> Option<OverlayId> {
        self.shape.as_ref().map(|shape| shape.overlay)
    }

    pub fn is_vertex_marker(&self, overlay: OverlayId) -> bool {
        self.vertex_markers().contains(&overlay)
    }

    /// Whether `overlay` is one of this entity's overlays
    pub fn owns_overlay(&self, overlay: OverlayId) -> bool {
        self.primary == overlay
            || self.editable_overlay() == Some(overlay)
            || self.is_vertex_marker(overlay)
    }

    // ===== Geometry =====

    /// Positions as currently shown on the map, including unsaved drags
    pub fn current_positions(&self, map: &impl MapSurface) -> Vec<LatLng> {
        match &self.shape {
            None => map
                .marker_position(self.primary)
                .or_else(|| self.record.coordinates.first().copied())
                .into_iter()
                .collect(),
            Some(shape) => shape
                .vertex_markers
                .iter()
                .zip(&self.record.coordinates)
                .map(|(&marker, &stored)| map.marker_position(marker).unwrap_or(stored))
                .collect(),
        }
    }

    pub fn current_bounds(&self, map: &impl MapSurface) -> Option<LatLngBounds> {
        LatLngBounds::from_positions(self.current_positions(map))
    }

    /// Where the map centers when this entity enters edit mode
    pub fn focus_point(&self, map: &impl MapSurface) -> Option<LatLng> {
        self.kind()
            .representative_point(&self.current_positions(map))
    }

    // ===== Edit affordances =====

    /// Make the point or the vertex markers draggable
    pub fn enable_affordances(&self, map: &mut impl MapSurface) {
        self.set_affordances(map, true);
    }

    pub fn disable_affordances(&self, map: &mut impl MapSurface) {
        self.set_affordances(map, false);
    }

    fn set_affordances(&self, map: &mut impl MapSurface, enabled: bool) {
        match &self.shape {
            None => map.set_draggable(self.primary, enabled),
            Some(shape) => {
                for &marker in &shape.vertex_markers {
                    map.set_draggable(marker, enabled);
                }
            }
        }
    }

    // ===== Vertex editing =====

    /// Replace the editable shape with one through the current marker
    /// positions
    pub fn rebuild_editable_overlay(&mut self, map: &mut impl MapSurface) {
        let positions = self.current_positions(&*map);
        let kind = self.kind();
        if let Some(shape) = &mut self.shape {
            map.remove_overlay(shape.overlay);
            shape.overlay = map.add_overlay(editable_overlay(kind, positions));
        }
    }

    /// Add a vertex collected by native drawing
    ///
    /// Keeps the marker arena the same length as the coordinate list.
    pub fn append_vertex(&mut self, at: LatLng, map: &mut impl MapSurface) {
        if self.shape.is_none() {
            return;
        }
        let marker = map.add_overlay(Overlay::Marker {
            position: at,
            draggable: self.is_editable,
        });
        self.record.coordinates.push(at);
        if let Some(shape) = &mut self.shape {
            shape.vertex_markers.push(marker);
        }
        self.rebuild_editable_overlay(map);
    }

    // ===== Save / cancel / delete =====

    /// Write the form values and current positions into the record
    ///
    /// Clears the dirty and editable flags, disables affordances and
    /// redraws the primary overlay from the new coordinates.
    pub fn apply_save(&mut self, name: String, description: String, map: &mut impl MapSurface) {
        self.record.name = name;
        self.record.description = description;
        self.record.coordinates = self.current_positions(&*map);
        self.is_edited = false;
        self.is_editable = false;
        self.has_ended = true;
        self.save_requested = true;
        self.disable_affordances(map);

        if self.shape.is_some() {
            map.remove_overlay(self.primary);
            self.primary = map.add_overlay(primary_overlay(self.kind(), &self.record.coordinates));
        }
    }

    /// Put every marker back at its stored position
    pub fn restore(&mut self, map: &mut impl MapSurface) {
        match &self.shape {
            None => {
                if let Some(&stored) = self.record.coordinates.first() {
                    map.set_marker_position(self.primary, stored);
                }
            }
            Some(shape) => {
                for (&marker, &stored) in shape.vertex_markers.iter().zip(&self.record.coordinates) {
                    map.set_marker_position(marker, stored);
                }
            }
        }
        self.rebuild_editable_overlay(map);
        self.is_edited = false;
    }

    /// Take every overlay of this entity off the map
    pub fn remove_from(&self, map: &mut impl MapSurface) {
        map.remove_overlay(self.primary);
        if let Some(shape) = &self.shape {
            map.remove_overlay(shape.overlay);
            for &marker in &shape.vertex_markers {
                map.remove_overlay(marker);
            }
        }
    }
}

fn primary_overlay(kind: GeometryKind, coordinates: &[LatLng]) -> Overlay {
    match kind {
        GeometryKind::Point => Overlay::Marker {
            position: coordinates.first().copied().unwrap_or(LatLng::new(0.0, 0.0)),
            draggable: false,
        },
        GeometryKind::Line => Overlay::Polyline {
            path: coordinates.to_vec(),
            style: OverlayStyle::primary_line(),
        },
        GeometryKind::Polygon => Overlay::Polygon {
            path: coordinates.to_vec(),
            style: OverlayStyle::primary_polygon(),
        },
    }
}

fn editable_overlay(kind: GeometryKind, path: Vec<LatLng>) -> Overlay {
    match kind {
        GeometryKind::Polygon => Overlay::Polygon {
            path,
            style: OverlayStyle::editable_polygon(),
        },
        _ => Overlay::Polyline {
            path,
            style: OverlayStyle::editable_line(),
        },
    }
}
