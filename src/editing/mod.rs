// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model: modes, selection, geometry entities and the highlight

pub mod entity;
pub mod highlight;
pub mod mode;
pub mod state;

pub use entity::{GeometryEntity, Lifecycle};
pub use highlight::HighlightOverlay;
pub use mode::Mode;
pub use state::PanelState;
