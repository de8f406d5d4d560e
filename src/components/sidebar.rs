// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Sidebar list entries, one per geometry entity.
//!
//! An entry holds presentation only: whether it shows a read-only summary
//! or an edit form, how it is tinted, and the text typed into the form.
//! Record data always comes from the entity. The panel drives entries
//! through `SidebarSignal`s; hosts report user input as `SidebarAction`s.

use crate::editing::GeometryEntity;
use crate::model::EntityId;
use crate::theme;
use chrono::{DateTime, NaiveDateTime};
use peniko::Color;

// ============================================================================
// SIGNALS AND ACTIONS
// ============================================================================

/// Transitions the panel applies to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSignal {
    /// Select and scroll to the entry, read-only
    Highlight,
    /// Open the edit form (owners only)
    EnableEdit,
    /// Tint the entry to flag unsaved changes
    DataEdit,
    /// Back to the read-only summary
    ResetView,
}

/// User input on an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    /// Click anywhere on the entry
    Click,
    /// The summary's "Modify" button
    Modify,
    EditName(String),
    EditDescription(String),
    Save,
    Delete,
    Cancel,
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Presentation state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    #[default]
    Viewing,
    Editing,
    Highlighted,
}

/// Background tint of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryTint {
    #[default]
    Plain,
    Selected,
    Dirty,
}

impl EntryTint {
    pub fn color(self) -> Color {
        match self {
            EntryTint::Plain => theme::entry::PLAIN,
            EntryTint::Selected => theme::entry::SELECTED,
            EntryTint::Dirty => theme::entry::DIRTY,
        }
    }
}

/// Read-only rendering of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub name: String,
    pub description: String,
    /// Owner and creation time
    pub created: String,
    /// Whether a "Modify" action is offered
    pub can_modify: bool,
}

/// Editable fields of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub name: String,
    pub description: String,
}

/// What the entry currently renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    Summary(Summary),
    Form(EditForm),
}

// ============================================================================
// ENTRY
// ============================================================================

/// Sidebar entry paired with one entity
#[derive(Debug, Clone)]
pub struct SidebarEntry {
    entity: EntityId,
    state: EntryState,
    tint: EntryTint,
    view: SidebarView,
}

impl SidebarEntry {
    /// A read-only entry for `entity`
    pub fn new(entity: &GeometryEntity) -> Self {
        Self {
            entity: entity.id,
            state: EntryState::Viewing,
            tint: EntryTint::Plain,
            view: SidebarView::Summary(summary(entity)),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn tint(&self) -> EntryTint {
        self.tint
    }

    pub fn view(&self) -> &SidebarView {
        &self.view
    }

    pub fn is_editing(&self) -> bool {
        self.state == EntryState::Editing
    }

    /// The open form, if the entry is editing
    pub fn form(&self) -> Option<&EditForm> {
        match &self.view {
            SidebarView::Form(form) => Some(form),
            SidebarView::Summary(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        match &mut self.view {
            SidebarView::Form(form) => Some(form),
            SidebarView::Summary(_) => None,
        }
    }

    /// Drop any form and render the summary
    ///
    /// A dirty tint survives while the entity still has unsaved changes.
    pub fn reset_view(&mut self, entity: &GeometryEntity) {
        self.state = EntryState::Viewing;
        if !entity.is_edited {
            self.tint = EntryTint::Plain;
        }
        self.view = SidebarView::Summary(summary(entity));
    }

    /// Render the edit form filled from the record
    pub fn show_form(&mut self, entity: &GeometryEntity) {
        self.state = EntryState::Editing;
        self.tint = if entity.is_edited {
            EntryTint::Dirty
        } else {
            EntryTint::Selected
        };
        self.view = SidebarView::Form(EditForm {
            name: entity.record.name.clone(),
            description: entity.record.description.clone(),
        });
    }

    pub fn mark_highlighted(&mut self) {
        self.state = EntryState::Highlighted;
        self.tint = EntryTint::Selected;
    }

    pub fn mark_dirty(&mut self) {
        self.tint = EntryTint::Dirty;
    }
}

fn summary(entity: &GeometryEntity) -> Summary {
    let record = &entity.record;
    let created = match &record.timestamp {
        Some(timestamp) => format!("{},{}", record.user_id, display_timestamp(timestamp)),
        None => record.user_id.clone(),
    };
    Summary {
        name: record.name.clone(),
        description: record.description.clone(),
        created,
        can_modify: entity.is_owned(),
    }
}

/// Shorten server timestamps to minutes; unknown formats pass through
fn display_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

// ============================================================================
// SIDEBAR
// ============================================================================

/// Ordered list of entries, in creation order
#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
    scrolled_to: Option<EntityId>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SidebarEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: SidebarEntry) {
        self.entries.push(entry);
    }

    pub fn get(&self, entity: EntityId) -> Option<&SidebarEntry> {
        self.entries.iter().find(|entry| entry.entity == entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut SidebarEntry> {
        self.entries.iter_mut().find(|entry| entry.entity == entity)
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<SidebarEntry> {
        if self.scrolled_to == Some(entity) {
            self.scrolled_to = None;
        }
        let index = self.entries.iter().position(|entry| entry.entity == entity)?;
        Some(self.entries.remove(index))
    }

    /// Entry the list was last scrolled to
    pub fn scrolled_to(&self) -> Option<EntityId> {
        self.scrolled_to
    }

    pub fn scroll_into_view(&mut self, entity: EntityId) {
        self.scrolled_to = Some(entity);
    }
}
