// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Sidebar signals and form actions for AdminPanel

use super::AdminPanel;
use crate::components::{EditForm, SidebarAction, SidebarSignal};
use crate::editing::Lifecycle;
use crate::map::MapSurface;
use crate::model::EntityId;
use crate::persistence::Operation;

impl<M: MapSurface> AdminPanel<M> {
    /// Apply `signal` to the entry of `id`
    ///
    /// EnableEdit from anyone but the owner degrades to Highlight.
    pub fn dispatch(&mut self, id: EntityId, signal: SidebarSignal) {
        match signal {
            SidebarSignal::Highlight => self.highlight_entry(id),
            SidebarSignal::EnableEdit => self.enable_edit(id),
            SidebarSignal::DataEdit => {
                if let Some(entry) = self.sidebar.get_mut(id) {
                    entry.mark_dirty();
                }
            }
            SidebarSignal::ResetView => self.reset_view(id),
        }
    }

    /// Handle user input on the entry of `id`
    pub fn handle_sidebar_action(&mut self, id: EntityId, action: SidebarAction) {
        if self.index_of(id).is_none() {
            tracing::warn!("action {:?} for unknown entity {}", action, id);
            return;
        }
        let editing = self.sidebar.get(id).is_some_and(|entry| entry.is_editing());

        match action {
            SidebarAction::Click => self.activate(id),
            SidebarAction::Modify if !editing => self.dispatch(id, SidebarSignal::EnableEdit),
            SidebarAction::EditName(name) => self.edit_form(id, |form| form.name = name),
            SidebarAction::EditDescription(description) => {
                self.edit_form(id, |form| form.description = description)
            }
            SidebarAction::Save if editing => self.save(id),
            SidebarAction::Delete if editing => self.delete(id),
            SidebarAction::Cancel if editing => self.cancel(id),
            SidebarAction::Modify => tracing::debug!("form for {} is already open", id),
            other => tracing::debug!("ignoring {:?} on {} outside edit mode", other, id),
        }
    }

    /// Click on an entity's overlay or entry
    ///
    /// Owners open the form (unless it is already open); everyone else
    /// only gets the highlight.
    pub(super) fn activate(&mut self, id: EntityId) {
        let Some(entity) = self.entity(id) else {
            return;
        };
        if !entity.is_owned() {
            self.dispatch(id, SidebarSignal::Highlight);
        } else if !self.sidebar.get(id).is_some_and(|entry| entry.is_editing()) {
            self.dispatch(id, SidebarSignal::EnableEdit);
        }
    }

    // ===== Signal handlers =====

    fn highlight_entry(&mut self, id: EntityId) {
        if self.index_of(id).is_none() {
            return;
        }
        self.reset_all_except(None);
        self.state.select(id);
        if let Some(entry) = self.sidebar.get_mut(id) {
            entry.mark_highlighted();
        }
        self.sidebar.scroll_into_view(id);
        self.update_highlight();
    }

    fn enable_edit(&mut self, id: EntityId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if !self.entities[index].is_owned() {
            tracing::debug!("{} is read-only for {}", id, self.current_user);
            self.highlight_entry(id);
            return;
        }

        // Resets first, so no other entity stays editable
        self.reset_all_except(Some(id));

        let entity = &mut self.entities[index];
        entity.is_editable = true;
        if let Some(entry) = self.sidebar.get_mut(id) {
            entry.show_form(entity);
        }
        self.state.select(id);
        if let Some(center) = entity.focus_point(&self.map) {
            self.map.set_center(center);
        }
        entity.enable_affordances(&mut self.map);
        self.sidebar.scroll_into_view(id);
        self.update_highlight();
    }

    fn reset_view(&mut self, id: EntityId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let entity = &mut self.entities[index];
        entity.is_editable = false;
        entity.disable_affordances(&mut self.map);
        if let Some(entry) = self.sidebar.get_mut(id) {
            entry.reset_view(entity);
        }
    }

    fn reset_all_except(&mut self, keep: Option<EntityId>) {
        let ids: Vec<EntityId> = self
            .entities
            .iter()
            .map(|entity| entity.id)
            .filter(|&id| Some(id) != keep)
            .collect();
        for id in ids {
            self.reset_view(id);
        }
    }

    // ===== Form actions =====

    /// Change a form field; marks the entity dirty
    fn edit_form(&mut self, id: EntityId, apply: impl FnOnce(&mut EditForm)) {
        let Some(form) = self.sidebar.get_mut(id).and_then(|entry| entry.form_mut()) else {
            tracing::debug!("no open form for {}", id);
            return;
        };
        apply(form);
        if let Some(index) = self.index_of(id) {
            self.entities[index].is_edited = true;
        }
        self.dispatch(id, SidebarSignal::DataEdit);
    }

    /// Write the form into the record and queue an add or edit
    fn save(&mut self, id: EntityId) {
        let Some(form) = self.sidebar.get(id).and_then(|entry| entry.form()).cloned() else {
            return;
        };
        let Some(index) = self.index_of(id) else {
            return;
        };

        let entity = &mut self.entities[index];
        entity.apply_save(form.name, form.description, &mut self.map);
        let operation = if entity.record.is_saved() {
            Operation::Edit
        } else {
            Operation::Add
        };
        self.persistence.queue_record(operation, &entity.record, id);
        tracing::info!("Saving {} '{}' ({})", entity.kind().wire_name(), entity.record.name, operation);

        if let Some(entry) = self.sidebar.get_mut(id) {
            entry.reset_view(entity);
        }
        self.state.clear_selection();
        self.update_highlight();
    }

    /// Queue a delete and drop the entity right away
    ///
    /// Local removal does not wait for the server and is not undone if the
    /// delete fails.
    fn delete(&mut self, id: EntityId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.persistence
            .queue_record(Operation::Delete, &self.entities[index].record, id);
        if let Some(entity) = self.remove_entity(id) {
            tracing::info!("Deleted {} '{}'", entity.kind().wire_name(), entity.record.name);
        }
    }

    /// Discard the open form and any unsaved drags
    ///
    /// Geometry that was never saved is abandoned instead.
    fn cancel(&mut self, id: EntityId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.entities[index].lifecycle() == Lifecycle::Unsaved {
            tracing::debug!("abandoning unsaved {}", id);
            self.remove_entity(id);
            return;
        }

        self.entities[index].restore(&mut self.map);
        self.reset_view(id);
        self.state.clear_selection();
        self.update_highlight();
    }
}
