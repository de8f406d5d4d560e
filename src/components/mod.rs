// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components: mode toolbar, sidebar entries and the status line

pub mod mode_control;
pub mod sidebar;
pub mod status;

// Re-export commonly used component types
pub use mode_control::{ModeButton, ModeControl};
pub use sidebar::{
    EditForm, EntryState, EntryTint, Sidebar, SidebarAction, SidebarEntry, SidebarSignal,
    SidebarView, Summary,
};
pub use status::StatusLine;
