// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Selection highlight.
//!
//! The highlight is recomputed from scratch whenever the selection or the
//! viewport changes. The previous overlay is always removed first and a new
//! one added; it is never edited in place.

use super::GeometryEntity;
use crate::map::{MapSurface, Overlay, OverlayStyle};
use crate::model::{GeometryKind, LatLng, LatLngBounds, OverlayId};
use crate::settings;

/// Owner of the single highlight overlay on the map
#[derive(Debug, Clone, Default)]
pub struct HighlightOverlay {
    overlay: Option<OverlayId>,
}

impl HighlightOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the highlight currently drawn, if any
    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    /// Redraw for `selected`, or clear when nothing is selected
    pub fn update(&mut self, selected: Option<&GeometryEntity>, map: &mut impl MapSurface) {
        if let Some(old) = self.overlay.take() {
            map.remove_overlay(old);
        }
        let Some(entity) = selected else {
            return;
        };
        let Some(path) = highlight_path(entity, &*map) else {
            return;
        };
        self.overlay = Some(map.add_overlay(Overlay::Polygon {
            path,
            style: OverlayStyle::highlight(entity.is_edited),
        }));
    }
}

/// Closed outline of the highlight for `entity`
///
/// `None` while a line or polygon is still being drawn, so the indicator
/// does not flicker as vertices are placed.
pub fn highlight_path(entity: &GeometryEntity, map: &impl MapSurface) -> Option<Vec<LatLng>> {
    match entity.kind() {
        GeometryKind::Point => {
            let center = entity.current_positions(map).into_iter().next()?;
            Some(diamond(center, map.bounds()))
        }
        GeometryKind::Line | GeometryKind::Polygon => {
            if entity.is_editable && !entity.has_ended {
                return None;
            }
            entity.current_bounds(map).map(rectangle)
        }
    }
}

/// Diamond around `center` sized to a fraction of the viewport span
fn diamond(center: LatLng, viewport: LatLngBounds) -> Vec<LatLng> {
    let span = viewport.span();
    let half_lat = span.lat * settings::highlight::SPAN_FRACTION;
    let half_lng = span.lng * settings::highlight::SPAN_FRACTION;
    vec![
        LatLng::new(center.lat - half_lat, center.lng),
        LatLng::new(center.lat, center.lng + half_lng),
        LatLng::new(center.lat + half_lat, center.lng),
        LatLng::new(center.lat, center.lng - half_lng),
        LatLng::new(center.lat - half_lat, center.lng),
    ]
}

fn rectangle(bounds: LatLngBounds) -> Vec<LatLng> {
    let ne = bounds.north_east();
    let sw = bounds.south_west();
    vec![
        LatLng::new(ne.lat, sw.lng),
        LatLng::new(ne.lat, ne.lng),
        LatLng::new(sw.lat, ne.lng),
        LatLng::new(sw.lat, sw.lng),
        LatLng::new(ne.lat, sw.lng),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HeadlessMap;
    use crate::model::GeometryRecord;
    use crate::theme;

    fn point(map: &mut HeadlessMap) -> GeometryEntity {
        let record = GeometryRecord::new(GeometryKind::Point, "me", vec![map.center()]);
        GeometryEntity::create(record, "me", false, map)
    }

    #[test]
    fn no_selection_draws_nothing() {
        let mut map = HeadlessMap::default();
        let mut highlight = HighlightOverlay::new();
        highlight.update(None, &mut map);
        assert!(highlight.overlay().is_none());
        assert_eq!(map.overlay_count(), 0);
    }

    #[test]
    fn point_diamond_scales_with_zoom() {
        let mut map = HeadlessMap::default();
        let entity = point(&mut map);

        let wide = highlight_path(&entity, &map).unwrap();
        let span = map.bounds().span();
        assert!((wide[2].lat - wide[0].lat - span.lat * 0.1).abs() < 1e-9);
        assert!((wide[1].lng - wide[3].lng - span.lng * 0.1).abs() < 1e-9);

        map.set_zoom(map.zoom() + 2);
        let narrow = highlight_path(&entity, &map).unwrap();
        let wide_height = wide[2].lat - wide[0].lat;
        let narrow_height = narrow[2].lat - narrow[0].lat;
        assert!((wide_height / narrow_height - 4.0).abs() < 1e-9);
    }

    #[test]
    fn line_highlight_is_bounding_rectangle() {
        let mut map = HeadlessMap::default();
        let record = GeometryRecord::new(
            GeometryKind::Line,
            "me",
            vec![LatLng::new(0.0, 0.0), LatLng::new(2.0, 3.0)],
        );
        let entity = GeometryEntity::create(record, "me", false, &mut map);

        let path = highlight_path(&entity, &map).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], LatLng::new(2.0, 0.0));
        assert_eq!(path[2], LatLng::new(0.0, 3.0));
        assert_eq!(path[0], path[4]);
    }

    #[test]
    fn line_being_drawn_is_skipped() {
        let mut map = HeadlessMap::default();
        let record = GeometryRecord::new(GeometryKind::Line, "me", vec![LatLng::new(0.0, 0.0)]);
        let mut entity = GeometryEntity::create(record, "me", true, &mut map);
        entity.is_editable = true;

        assert!(highlight_path(&entity, &map).is_none());
        entity.has_ended = true;
        assert!(highlight_path(&entity, &map).is_some());
    }

    #[test]
    fn update_replaces_overlay_and_tracks_dirty_color() {
        let mut map = HeadlessMap::default();
        let mut entity = point(&mut map);
        let mut highlight = HighlightOverlay::new();

        highlight.update(Some(&entity), &mut map);
        let first = highlight.overlay().unwrap();

        entity.is_edited = true;
        highlight.update(Some(&entity), &mut map);
        let second = highlight.overlay().unwrap();

        assert_ne!(first, second);
        assert!(map.overlay(first).is_none());
        match map.overlay(second) {
            Some(Overlay::Polygon { style, .. }) => {
                assert_eq!(
                    style.fill.map(|c| c.to_rgba8()),
                    Some(theme::highlight::DIRTY.to_rgba8())
                );
                assert!(!style.clickable);
            }
            other => panic!("unexpected overlay: {other:?}"),
        }
        // marker + highlight
        assert_eq!(map.overlay_count(), 2);
    }
}
