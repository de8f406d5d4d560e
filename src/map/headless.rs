// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! In-memory map surface.
//!
//! Keeps overlays in an ordered map and models the viewport as a fixed-size
//! pixel window over a linear projection: at zoom `z` one pixel covers
//! `360 / (256 * 2^z)` degrees on both axes. That is enough to make spans
//! shrink as the user zooms in, which is all the highlight overlay and the
//! fit-to-bounds logic depend on.

use super::{MapSurface, Overlay};
use crate::model::{LatLng, LatLngBounds, OverlayId};
use crate::settings;
use std::collections::BTreeMap;

/// Default viewport size in pixels
const DEFAULT_VIEWPORT: (f64, f64) = (1024.0, 700.0);

/// A map surface that only keeps state
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    overlays: BTreeMap<OverlayId, Overlay>,
    center: LatLng,
    zoom: u8,
    viewport_px: (f64, f64),
}

impl HeadlessMap {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            overlays: BTreeMap::new(),
            center,
            zoom: zoom.min(settings::map::MAX_ZOOM),
            viewport_px: DEFAULT_VIEWPORT,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Move a draggable marker as a user drag would
    ///
    /// Returns false when the marker does not exist or is not draggable;
    /// the caller reports `MapEvent::DragEnd` afterwards.
    pub fn drag_marker(&mut self, id: OverlayId, to: LatLng) -> bool {
        match self.overlays.get_mut(&id) {
            Some(Overlay::Marker {
                position,
                draggable: true,
            }) => {
                *position = to;
                true
            }
            _ => false,
        }
    }

    pub fn is_draggable(&self, id: OverlayId) -> bool {
        matches!(
            self.overlays.get(&id),
            Some(Overlay::Marker {
                draggable: true,
                ..
            })
        )
    }

    fn degrees_per_pixel(zoom: u8) -> f64 {
        360.0 / (256.0 * f64::from(1u32 << zoom.min(settings::map::MAX_ZOOM)))
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(
            LatLng::new(
                settings::map::DEFAULT_CENTER_LAT,
                settings::map::DEFAULT_CENTER_LNG,
            ),
            settings::map::DEFAULT_ZOOM,
        )
    }
}

impl MapSurface for HeadlessMap {
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        let id = OverlayId::next();
        self.overlays.insert(id, overlay);
        id
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id);
    }

    fn set_draggable(&mut self, id: OverlayId, enabled: bool) {
        if let Some(Overlay::Marker { draggable, .. }) = self.overlays.get_mut(&id) {
            *draggable = enabled;
        }
    }

    fn marker_position(&self, id: OverlayId) -> Option<LatLng> {
        match self.overlays.get(&id) {
            Some(Overlay::Marker { position, .. }) => Some(*position),
            _ => None,
        }
    }

    fn set_marker_position(&mut self, id: OverlayId, to: LatLng) {
        if let Some(Overlay::Marker { position, .. }) = self.overlays.get_mut(&id) {
            *position = to;
        }
    }

    fn bounds(&self) -> LatLngBounds {
        let per_px = Self::degrees_per_pixel(self.zoom);
        let half_lng = self.viewport_px.0 * per_px / 2.0;
        let half_lat = self.viewport_px.1 * per_px / 2.0;
        LatLngBounds::new(
            LatLng::new(self.center.lat - half_lat, self.center.lng - half_lng),
            LatLng::new(self.center.lat + half_lat, self.center.lng + half_lng),
        )
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(settings::map::MAX_ZOOM);
    }

    fn bounds_zoom_level(&self, bounds: &LatLngBounds) -> u8 {
        let span = bounds.span();
        (0..=settings::map::MAX_ZOOM)
            .rev()
            .find(|&zoom| {
                let per_px = Self::degrees_per_pixel(zoom);
                span.lng <= self.viewport_px.0 * per_px && span.lat <= self.viewport_px.1 * per_px
            })
            .unwrap_or(0)
    }
}
