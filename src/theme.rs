// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use peniko::Color;

// ============================================================================
// GEOMETRY OVERLAYS
// ============================================================================
const LINE_STROKE: Color = Color::from_rgb8(0xff, 0x00, 0x00);
const POLYGON_STROKE: Color = Color::from_rgb8(0x00, 0x00, 0xff);
const POLYGON_FILL: Color = Color::from_rgb8(0x00, 0x00, 0xff);

// Primary (non-editable) overlays are drawn faint underneath the editable one
const PRIMARY_STROKE: Color = Color::from_rgb8(0x00, 0x00, 0xff);

// ============================================================================
// SELECTION HIGHLIGHT
// ============================================================================
const HIGHLIGHT_CLEAN: Color = Color::from_rgb8(0xff, 0x89, 0x21);
const HIGHLIGHT_DIRTY: Color = Color::from_rgb8(0xff, 0x00, 0x00);
const HIGHLIGHT_OPACITY: f32 = 0.2;

// ============================================================================
// SIDEBAR ENTRIES
// ============================================================================
const ENTRY_PLAIN: Color = Color::from_rgb8(0xff, 0xff, 0xff);
const ENTRY_SELECTED: Color = Color::from_rgb8(0xff, 0xd7, 0xae);
const ENTRY_DIRTY: Color = Color::from_rgb8(0xf4, 0xbf, 0xba);

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Overlay colors for stored geometries
pub mod overlay {
    use peniko::Color;
    pub const LINE_STROKE: Color = super::LINE_STROKE;
    pub const POLYGON_STROKE: Color = super::POLYGON_STROKE;
    pub const POLYGON_FILL: Color = super::POLYGON_FILL;
    pub const PRIMARY_STROKE: Color = super::PRIMARY_STROKE;
}

/// Selection highlight colors
pub mod highlight {
    use peniko::Color;
    /// Selection without unsaved changes
    pub const CLEAN: Color = super::HIGHLIGHT_CLEAN;
    /// Selection with unsaved changes
    pub const DIRTY: Color = super::HIGHLIGHT_DIRTY;
    pub const OPACITY: f32 = super::HIGHLIGHT_OPACITY;
}

/// Sidebar entry background tints
pub mod entry {
    use peniko::Color;
    pub const PLAIN: Color = super::ENTRY_PLAIN;
    pub const SELECTED: Color = super::ENTRY_SELECTED;
    pub const DIRTY: Color = super::ENTRY_DIRTY;
}
