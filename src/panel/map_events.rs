// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Map event routing for AdminPanel

use super::AdminPanel;
use crate::components::SidebarSignal;
use crate::map::{MapEvent, MapSurface};
use crate::model::{EntityId, GeometryKind, GeometryRecord, LatLng, OverlayId};

impl<M: MapSurface> AdminPanel<M> {
    /// Route one map interaction
    pub fn handle_map_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click {
                overlay: Some(overlay),
                ..
            } => self.overlay_clicked(overlay),
            MapEvent::Click { overlay: None, at } => self.map_clicked(at),
            MapEvent::ZoomEnd => self.update_highlight(),
            MapEvent::DragEnd { overlay } => self.drag_ended(overlay),
            MapEvent::VertexAppended { overlay, at } => self.vertex_appended(overlay, at),
            MapEvent::LineUpdated { overlay } => self.line_updated(overlay),
            MapEvent::EndLine { overlay } => self.line_ended(overlay),
        }
    }

    /// Whether the selected line or polygon is still collecting vertices
    pub fn drawing_in_progress(&self) -> bool {
        self.state
            .selected()
            .and_then(|id| self.entity(id))
            .is_some_and(|entity| !entity.has_ended)
    }

    // ===== Clicks =====

    /// Click on empty map: create geometry in the drawing modes
    fn map_clicked(&mut self, at: LatLng) {
        let Some(kind) = self.state.mode().creates() else {
            return;
        };
        if self.drawing_in_progress() {
            tracing::debug!("ignoring click at {:?} while a shape is being drawn", at);
            return;
        }
        let record = GeometryRecord::new(kind, self.current_user.clone(), vec![at]);
        let id = self.create_entity(record, true);
        tracing::info!("New {} {}", kind.wire_name(), id);
        self.dispatch(id, SidebarSignal::EnableEdit);
    }

    /// Click on an overlay never creates geometry
    fn overlay_clicked(&mut self, overlay: OverlayId) {
        if self.highlight.overlay() == Some(overlay) {
            return;
        }
        if let Some(id) = self.entity_for_overlay(overlay) {
            self.activate(id);
        }
    }

    // ===== Drags and drawing =====

    fn drag_ended(&mut self, overlay: OverlayId) {
        let Some((id, index)) = self.locate(overlay) else {
            return;
        };
        let entity = &mut self.entities[index];
        if !entity.is_editable {
            return;
        }
        if entity.is_vertex_marker(overlay) {
            entity.rebuild_editable_overlay(&mut self.map);
        } else if entity.kind() != GeometryKind::Point || entity.primary_overlay() != overlay {
            return;
        }
        entity.is_edited = true;
        self.dispatch(id, SidebarSignal::DataEdit);
        self.update_highlight();
    }

    fn vertex_appended(&mut self, overlay: OverlayId, at: LatLng) {
        let Some((id, index)) = self.locate(overlay) else {
            return;
        };
        let entity = &mut self.entities[index];
        if !entity.is_editable || entity.has_ended {
            tracing::debug!("vertex for {} outside drawing", id);
            return;
        }
        entity.append_vertex(at, &mut self.map);
        entity.is_edited = true;
        self.dispatch(id, SidebarSignal::DataEdit);
    }

    fn line_updated(&mut self, overlay: OverlayId) {
        let Some((id, index)) = self.locate(overlay) else {
            return;
        };
        let entity = &mut self.entities[index];
        if !entity.is_editable {
            return;
        }
        entity.is_edited = true;
        self.dispatch(id, SidebarSignal::DataEdit);
        self.update_highlight();
    }

    fn line_ended(&mut self, overlay: OverlayId) {
        let Some((id, index)) = self.locate(overlay) else {
            return;
        };
        let entity = &mut self.entities[index];
        if entity.has_ended || !entity.is_owned() {
            return;
        }
        entity.has_ended = true;
        entity.is_edited = true;
        tracing::debug!("{} finished with {} vertices", id, entity.record.coordinates.len());
        self.dispatch(id, SidebarSignal::DataEdit);
        self.update_highlight();
    }

    fn locate(&self, overlay: OverlayId) -> Option<(EntityId, usize)> {
        let id = self.entity_for_overlay(overlay)?;
        Some((id, self.index_of(id)?))
    }
}
