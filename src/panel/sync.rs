// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Backend sync for AdminPanel: load, flush and response handling

use super::AdminPanel;
use crate::map::MapSurface;
use crate::model::{EntityId, LatLngBounds};
use crate::persistence::{Operation, Request, Response, Transport};

impl<M: MapSurface> AdminPanel<M> {
    /// Queue a load of every stored geometry
    pub fn load(&mut self) {
        self.persistence.queue_load();
    }

    /// Deliver queued requests and apply what comes back
    ///
    /// Failures end up on the status line; local state is left as is.
    pub fn flush(&mut self, transport: &mut impl Transport) {
        let deliveries = self.persistence.flush(transport);
        if deliveries.is_empty() {
            return;
        }
        self.status.clear_error();
        for delivery in deliveries {
            match delivery.outcome {
                Ok(response) => self.apply_response(&delivery.request, &response),
                Err(e) => self.status.report(e),
            }
        }
    }

    fn apply_response(&mut self, request: &Request, response: &Response) {
        match response.operation().unwrap_or(request.operation) {
            Operation::Get => self.apply_load(response),
            Operation::Add => {
                if let Some(origin) = request.origin {
                    self.adopt_key(origin, response);
                }
            }
            operation => tracing::debug!("{} acknowledged", operation),
        }
    }

    /// Draw every loaded record read-only and fit the viewport
    ///
    /// A record whose key is already shown replaces that entity, unless the
    /// entity is being edited or has unsaved changes.
    fn apply_load(&mut self, response: &Response) {
        let mut bounds: Option<LatLngBounds> = None;
        let mut loaded = 0;

        for record in response.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    self.status.report(e);
                    continue;
                }
            };
            if let Some(position) = record.representative_point() {
                match &mut bounds {
                    Some(bounds) => bounds.extend(position),
                    None => bounds = Some(LatLngBounds::new(position, position)),
                }
            }
            let existing = self
                .entities
                .iter()
                .find(|entity| entity.record.key.is_some() && entity.record.key == record.key)
                .map(|entity| (entity.id, entity.is_edited || entity.is_editable));
            match existing {
                Some((id, true)) => {
                    tracing::debug!("keeping local changes to {}", id);
                    continue;
                }
                Some((id, false)) => {
                    self.remove_entity(id);
                }
                None => {}
            }
            self.create_entity(record, false);
            loaded += 1;
        }

        // A single record keeps the configured viewport
        if response.record_count() > 1
            && let Some(bounds) = bounds
        {
            self.map.set_center(bounds.center());
            let zoom = self.map.bounds_zoom_level(&bounds);
            self.map.set_zoom(zoom);
            self.update_highlight();
        }

        self.status.mark_synced();
        tracing::info!("Loaded {} of {} geometries", loaded, response.record_count());
    }

    /// Take over the key and timestamp the server assigned to a new record
    fn adopt_key(&mut self, origin: EntityId, response: &Response) {
        let Some(index) = self.index_of(origin) else {
            return;
        };
        let Some(saved) = response.records().into_iter().find_map(Result::ok) else {
            return;
        };
        let Some(key) = saved.key else {
            return;
        };

        let entity = &mut self.entities[index];
        if entity.record.key.is_none() {
            tracing::debug!("{} stored as {}", origin, key);
            entity.record.key = Some(key);
        }
        if saved.timestamp.is_some() {
            entity.record.timestamp = saved.timestamp;
        }
        if let Some(entry) = self.sidebar.get_mut(origin)
            && !entry.is_editing()
        {
            entry.reset_view(entity);
        }
    }
}
