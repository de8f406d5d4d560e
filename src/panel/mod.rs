// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! The admin panel (`AdminPanel`) that ties the map, sidebar and backend
//! together.
//!
//! `AdminPanel` owns the map surface, the entity collection, the sidebar,
//! the toolbar, the status line and the persistence outbox. Every input
//! (map events, sidebar actions, mode changes, delivered responses) is
//! handled synchronously by one method and leaves the panel consistent
//! before returning. Sub-modules split the methods by domain: map event
//! routing, sidebar signals and form actions, and backend sync.

mod map_events;
mod signals;
mod sync;

#[cfg(test)]
mod tests;

use crate::components::{ModeControl, Sidebar, SidebarEntry, SidebarSignal, StatusLine};
use crate::editing::{GeometryEntity, HighlightOverlay, Mode, PanelState};
use crate::map::MapSurface;
use crate::model::{EntityId, GeometryKind, GeometryRecord, LatLng, OverlayId};
use crate::persistence::PersistenceClient;

/// Administrative client state
pub struct AdminPanel<M: MapSurface> {
    map: M,
    /// Read-only session user, used for every ownership check
    current_user: String,
    state: PanelState,
    /// Entities in creation order (same order as the sidebar)
    entities: Vec<GeometryEntity>,
    sidebar: Sidebar,
    highlight: HighlightOverlay,
    toolbar: ModeControl,
    status: StatusLine,
    persistence: PersistenceClient,
}

impl<M: MapSurface> AdminPanel<M> {
    /// Create an empty panel in View mode
    pub fn new(map: M, current_user: impl Into<String>, base_url: impl Into<String>) -> Self {
        let toolbar = ModeControl::new();
        let status = StatusLine::new(toolbar.active().status_text());
        Self {
            map,
            current_user: current_user.into(),
            state: PanelState::new(),
            entities: Vec::new(),
            sidebar: Sidebar::new(),
            highlight: HighlightOverlay::new(),
            toolbar,
            status,
            persistence: PersistenceClient::new(base_url),
        }
    }

    // ===== Accessors =====

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Direct access for hosts that move the map themselves (drags, zoom)
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.state.selected()
    }

    pub fn entities(&self) -> &[GeometryEntity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&GeometryEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn entry(&self, id: EntityId) -> Option<&SidebarEntry> {
        self.sidebar.get(id)
    }

    pub fn toolbar(&self) -> &ModeControl {
        &self.toolbar
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn persistence(&self) -> &PersistenceClient {
        &self.persistence
    }

    /// Handle of the selection highlight currently on the map
    pub fn highlight_overlay(&self) -> Option<OverlayId> {
        self.highlight.overlay()
    }

    /// Entity that owns `overlay`, if any
    pub fn entity_for_overlay(&self, overlay: OverlayId) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.owns_overlay(overlay))
            .map(|entity| entity.id)
    }

    // ===== Mode =====

    /// Toolbar button activation: switch mode and broadcast its status
    pub fn set_mode(&mut self, mode: Mode) {
        let status = self.toolbar.activate(mode);
        self.state.set_mode(mode);
        self.status.set_text(status);
        tracing::debug!("mode -> {}", mode.name());
    }

    // ===== Search results =====

    /// Copy a search result onto the map as a new point and edit it
    ///
    /// Works in any mode, like the search bar's "Create copy on map".
    pub fn import_place(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        position: LatLng,
    ) -> EntityId {
        let mut record =
            GeometryRecord::new(GeometryKind::Point, self.current_user.clone(), vec![position]);
        record.name = name.into();
        record.description = address.into();
        let id = self.create_entity(record, true);
        self.dispatch(id, SidebarSignal::EnableEdit);
        id
    }

    // ===== Collection =====

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id == id)
    }

    /// Draw a record, register it and give it a read-only sidebar entry
    fn create_entity(&mut self, record: GeometryRecord, is_new: bool) -> EntityId {
        let entity = GeometryEntity::create(record, &self.current_user, is_new, &mut self.map);
        let id = entity.id;
        self.sidebar.push(SidebarEntry::new(&entity));
        self.entities.push(entity);
        self.dispatch(id, SidebarSignal::ResetView);
        id
    }

    /// Take an entity off the map, out of the sidebar and the selection
    fn remove_entity(&mut self, id: EntityId) -> Option<GeometryEntity> {
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        entity.remove_from(&mut self.map);
        self.sidebar.remove(id);
        self.state.forget(id);
        self.update_highlight();
        Some(entity)
    }

    /// Redraw the selection highlight
    fn update_highlight(&mut self) {
        let selected = self
            .state
            .selected()
            .and_then(|id| self.entities.iter().find(|entity| entity.id == id));
        self.highlight.update(selected, &mut self.map);
    }
}
