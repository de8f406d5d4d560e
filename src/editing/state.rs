// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Panel-wide mode and selection.
//!
//! `PanelState` is only changed through the named transitions below, so
//! the order in which the panel resets entries and then selects one is
//! visible at the call site instead of emerging from handler order.

use super::Mode;
use crate::model::EntityId;

/// Current drawing mode and selected entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    mode: Mode,
    selected: Option<EntityId>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Make `id` the single selected entity
    pub fn select(&mut self, id: EntityId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if it points at a removed entity
    pub fn forget(&mut self, id: EntityId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}
