// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Mode toolbar - View / Point / Line / Poly buttons
//!
//! Exactly one button is active at a time. Activating a button deactivates
//! the rest and yields the status message for the new mode; the panel
//! broadcasts it on the status line.

use crate::editing::Mode;

/// One toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeButton {
    pub mode: Mode,
    pub active: bool,
}

impl ModeButton {
    /// Hover text, same as the status message the button broadcasts
    pub fn tooltip(&self) -> &'static str {
        self.mode.status_text()
    }
}

/// The drawing-mode toolbar
#[derive(Debug, Clone)]
pub struct ModeControl {
    buttons: [ModeButton; 4],
}

impl ModeControl {
    /// Toolbar with the View button active
    pub fn new() -> Self {
        let mut control = Self {
            buttons: Mode::ALL.map(|mode| ModeButton {
                mode,
                active: false,
            }),
        };
        control.activate(Mode::View);
        control
    }

    pub fn buttons(&self) -> &[ModeButton] {
        &self.buttons
    }

    /// Mode of the active button
    pub fn active(&self) -> Mode {
        self.buttons
            .iter()
            .find(|button| button.active)
            .map(|button| button.mode)
            .unwrap_or_default()
    }

    /// Activate the button for `mode` and return its status message
    pub fn activate(&mut self, mode: Mode) -> &'static str {
        for button in &mut self.buttons {
            button.active = button.mode == mode;
        }
        mode.status_text()
    }
}

impl Default for ModeControl {
    fn default() -> Self {
        Self::new()
    }
}
