// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across sessions.
//! Visual styling (colors) belongs in `theme.rs`; per-user values such as
//! the backend address live in the runtime `Config`.

// ============================================================================
// MAP SETTINGS
// ============================================================================
/// Initial map center latitude when no config overrides it
const DEFAULT_CENTER_LAT: f64 = 37.0;

/// Initial map center longitude when no config overrides it
const DEFAULT_CENTER_LNG: f64 = -122.0;

/// Initial zoom level
const DEFAULT_ZOOM: u8 = 8;

/// Deepest zoom level a map surface will fit bounds to
const MAX_ZOOM: u8 = 19;

// ============================================================================
// HIGHLIGHT SETTINGS
// ============================================================================
/// Half-extent of the point highlight diamond, as a fraction of the
/// viewport span on each axis. Scales the indicator with zoom.
const HIGHLIGHT_SPAN_FRACTION: f64 = 0.05;

// ============================================================================
// BACKEND SETTINGS
// ============================================================================
/// Base URL used when neither the config file nor the command line sets one
const DEFAULT_BASE_URL: &str = "http://localhost:8080/gen/request";

/// Output format appended to load requests
const LOAD_OUTPUT_FORMAT: &str = "json";

// ============================================================================
// CONFIG FILE SETTINGS
// ============================================================================
/// Directory under the user's config dir holding the config file
const CONFIG_DIR_NAME: &str = "geoadmin";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.toml";

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Map viewport defaults
pub mod map {
    pub const DEFAULT_CENTER_LAT: f64 = super::DEFAULT_CENTER_LAT;
    pub const DEFAULT_CENTER_LNG: f64 = super::DEFAULT_CENTER_LNG;
    pub const DEFAULT_ZOOM: u8 = super::DEFAULT_ZOOM;
    pub const MAX_ZOOM: u8 = super::MAX_ZOOM;
}

/// Selection highlight settings
pub mod highlight {
    /// Point diamond half-extent as a fraction of the viewport span
    pub const SPAN_FRACTION: f64 = super::HIGHLIGHT_SPAN_FRACTION;
}

/// Backend request settings
pub mod backend {
    pub const DEFAULT_BASE_URL: &str = super::DEFAULT_BASE_URL;
    pub const LOAD_OUTPUT_FORMAT: &str = super::LOAD_OUTPUT_FORMAT;
}

/// Config file location
pub mod config {
    pub const DIR_NAME: &str = super::CONFIG_DIR_NAME;
    pub const FILE_NAME: &str = super::CONFIG_FILE_NAME;
}
