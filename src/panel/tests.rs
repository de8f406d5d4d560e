// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Scenario tests for AdminPanel

use super::AdminPanel;
use crate::components::{EntryState, EntryTint, SidebarAction, SidebarView};
use crate::editing::Mode;
use crate::map::{HeadlessMap, MapEvent, MapSurface, Overlay};
use crate::model::{EntityId, GeometryKind, LatLng, OverlayId};
use crate::persistence::{Operation, ScriptedTransport};
use serde_json::{Value, json};

fn panel() -> AdminPanel<HeadlessMap> {
    AdminPanel::new(HeadlessMap::default(), "alice", "http://host/gen/request")
}

fn record(key: &str, kind: &str, user: &str, coords: &[(f64, f64)]) -> Value {
    let coordinates: Vec<Value> = coords
        .iter()
        .map(|(lat, lng)| json!({"lat": lat, "lng": lng}))
        .collect();
    json!({
        "key": key,
        "type": kind,
        "name": format!("{key} name"),
        "description": format!("{key} description"),
        "userId": user,
        "timeStamp": "2008-05-01 12:00:00",
        "coordinates": coordinates,
    })
}

fn response(operation: &str, records: Vec<Value>) -> String {
    json!({
        "status": "success",
        "operation": operation,
        "result": {"geometries": {"records": records}},
    })
    .to_string()
}

/// Queue a load and answer it with `records`
fn load(panel: &mut AdminPanel<HeadlessMap>, records: Vec<Value>) {
    panel.load();
    let mut transport = ScriptedTransport::default();
    transport.respond(response("get", records));
    panel.flush(&mut transport);
}

fn queued(panel: &AdminPanel<HeadlessMap>) -> Vec<Operation> {
    panel.persistence().pending().map(|r| r.operation).collect()
}

fn only_entity(panel: &AdminPanel<HeadlessMap>) -> EntityId {
    assert_eq!(panel.entities().len(), 1);
    panel.entities()[0].id
}

fn click_map(panel: &mut AdminPanel<HeadlessMap>, lat: f64, lng: f64) {
    panel.handle_map_event(MapEvent::Click {
        overlay: None,
        at: LatLng::new(lat, lng),
    });
}

fn in_view(panel: &AdminPanel<HeadlessMap>, position: LatLng) -> bool {
    let bounds = panel.map().bounds();
    let (sw, ne) = (bounds.south_west(), bounds.north_east());
    (sw.lat..=ne.lat).contains(&position.lat) && (sw.lng..=ne.lng).contains(&position.lng)
}

/// Properties that must hold after every handler returns
fn assert_consistent(panel: &AdminPanel<HeadlessMap>) {
    let editable = panel.entities().iter().filter(|e| e.is_editable).count();
    assert!(editable <= 1, "{editable} entities are editable");

    if let Some(selected) = panel.selected() {
        assert!(panel.entity(selected).is_some(), "selected {selected} is gone");
    }

    assert_eq!(panel.sidebar().len(), panel.entities().len());
    for entity in panel.entities() {
        assert!(panel.entry(entity.id).is_some());
        if entity.kind() != GeometryKind::Point {
            assert_eq!(entity.vertex_markers().len(), entity.record.coordinates.len());
        }
    }
}

#[test]
fn starts_in_view_mode() {
    let panel = panel();
    assert_eq!(panel.mode(), Mode::View);
    assert_eq!(panel.toolbar().active(), Mode::View);
    assert_eq!(panel.status().text(), "Select geometries by clicking on them.");
}

#[test]
fn mode_switch_updates_toolbar_and_status() {
    let mut panel = panel();
    panel.set_mode(Mode::Poly);

    assert_eq!(panel.mode(), Mode::Poly);
    let active: Vec<_> = panel
        .toolbar()
        .buttons()
        .iter()
        .filter(|b| b.active)
        .map(|b| b.mode)
        .collect();
    assert_eq!(active, vec![Mode::Poly]);
    assert_eq!(
        panel.status().text(),
        "Click on the map to start creating a new filled poly."
    );
}

#[test]
fn view_mode_click_creates_nothing() {
    let mut panel = panel();
    click_map(&mut panel, 1.0, 2.0);
    assert!(panel.entities().is_empty());
    assert_eq!(panel.map().overlay_count(), 0);
}

#[test]
fn point_click_creates_point_in_edit_mode() {
    let mut panel = panel();
    panel.set_mode(Mode::Point);
    click_map(&mut panel, 1.0, 2.0);

    let id = only_entity(&panel);
    let entity = panel.entity(id).unwrap();
    assert_eq!(entity.kind(), GeometryKind::Point);
    assert!(entity.is_owned());
    assert!(entity.is_editable);
    assert!(entity.is_edited);
    assert!(panel.map().is_draggable(entity.primary_overlay()));
    assert_eq!(panel.selected(), Some(id));
    assert_eq!(panel.map().center(), LatLng::new(1.0, 2.0));

    let entry = panel.entry(id).unwrap();
    assert!(entry.is_editing());
    assert_eq!(entry.tint(), EntryTint::Dirty);
    assert!(panel.highlight_overlay().is_some());
    assert!(queued(&panel).is_empty());
    assert_consistent(&panel);
}

#[test]
fn line_drawing_blocks_new_shapes_until_ended() {
    let mut panel = panel();
    panel.set_mode(Mode::Line);
    click_map(&mut panel, 0.0, 0.0);
    let id = only_entity(&panel);

    // Still drawing: a second empty-map click is ignored
    click_map(&mut panel, 5.0, 5.0);
    assert_eq!(panel.entities().len(), 1);
    assert!(panel.highlight_overlay().is_none());

    let line = panel.entity(id).unwrap().primary_overlay();
    panel.handle_map_event(MapEvent::VertexAppended {
        overlay: line,
        at: LatLng::new(1.0, 1.0),
    });
    panel.handle_map_event(MapEvent::VertexAppended {
        overlay: line,
        at: LatLng::new(2.0, 0.0),
    });
    assert_eq!(panel.entity(id).unwrap().record.coordinates.len(), 3);
    assert_consistent(&panel);

    panel.handle_map_event(MapEvent::EndLine { overlay: line });
    assert!(panel.entity(id).unwrap().has_ended);
    assert!(panel.highlight_overlay().is_some());

    click_map(&mut panel, 5.0, 5.0);
    assert_eq!(panel.entities().len(), 2);
    // the new line took over edit mode
    assert!(!panel.entity(id).unwrap().is_editable);
    assert_consistent(&panel);
}

#[test]
fn overlay_click_never_creates_geometry() {
    let mut panel = panel();
    load(&mut panel, vec![record("b1", "point", "bob", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);
    let marker = panel.entity(id).unwrap().primary_overlay();

    panel.set_mode(Mode::Point);
    panel.handle_map_event(MapEvent::Click {
        overlay: Some(marker),
        at: LatLng::new(1.0, 1.0),
    });

    assert_eq!(panel.entities().len(), 1);
    assert_eq!(panel.selected(), Some(id));
    assert!(!panel.entity(id).unwrap().is_editable);
    assert_eq!(panel.entry(id).unwrap().state(), EntryState::Highlighted);
    assert_eq!(panel.sidebar().scrolled_to(), Some(id));
}

#[test]
fn only_owner_reaches_edit() {
    let mut panel = panel();
    load(
        &mut panel,
        vec![
            record("a1", "point", "alice", &[(1.0, 1.0)]),
            record("b1", "point", "bob", &[(2.0, 2.0)]),
        ],
    );
    let mine = panel.entities()[0].id;
    let theirs = panel.entities()[1].id;

    match panel.entry(theirs).unwrap().view() {
        SidebarView::Summary(summary) => {
            assert!(!summary.can_modify);
            assert_eq!(summary.created, "bob,2008-05-01 12:00");
        }
        other => panic!("unexpected view: {other:?}"),
    }

    panel.handle_sidebar_action(theirs, SidebarAction::Modify);
    assert!(!panel.entity(theirs).unwrap().is_editable);
    assert_eq!(panel.entry(theirs).unwrap().state(), EntryState::Highlighted);
    assert_eq!(panel.entry(theirs).unwrap().tint(), EntryTint::Selected);

    panel.handle_sidebar_action(mine, SidebarAction::Click);
    assert!(panel.entity(mine).unwrap().is_editable);
    assert!(panel.entry(mine).unwrap().is_editing());
    assert_eq!(panel.entry(theirs).unwrap().state(), EntryState::Viewing);
    assert_eq!(panel.selected(), Some(mine));
    assert_consistent(&panel);
}

#[test]
fn clicking_editing_entry_keeps_form() {
    let mut panel = panel();
    load(&mut panel, vec![record("a1", "point", "alice", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);

    panel.handle_sidebar_action(id, SidebarAction::Modify);
    panel.handle_sidebar_action(id, SidebarAction::EditName("Renamed".into()));
    panel.handle_sidebar_action(id, SidebarAction::Click);

    let form = panel.entry(id).unwrap().form().unwrap();
    assert_eq!(form.name, "Renamed");
    assert_eq!(panel.entry(id).unwrap().tint(), EntryTint::Dirty);
    assert!(panel.entity(id).unwrap().is_edited);
}

#[test]
fn save_without_key_adds_then_edits_with_adopted_key() {
    let mut panel = panel();
    panel.set_mode(Mode::Point);
    click_map(&mut panel, 1.0, 2.0);
    let id = only_entity(&panel);

    panel.handle_sidebar_action(id, SidebarAction::EditName("Dock".into()));
    panel.handle_sidebar_action(id, SidebarAction::Save);

    assert_eq!(queued(&panel), vec![Operation::Add]);
    let url = &panel.persistence().pending().next().unwrap().url;
    assert!(url.contains("operation=add"));
    assert!(url.contains("name=Dock"));
    assert!(url.ends_with("lat=1&lng=2"));

    let entity = panel.entity(id).unwrap();
    assert_eq!(entity.record.name, "Dock");
    assert!(!entity.is_edited);
    assert!(!entity.is_editable);
    assert!(!panel.map().is_draggable(entity.primary_overlay()));
    assert_eq!(panel.selected(), None);
    assert!(panel.highlight_overlay().is_none());
    assert_eq!(panel.entry(id).unwrap().tint(), EntryTint::Plain);

    let mut transport = ScriptedTransport::default();
    transport.respond(response(
        "add",
        vec![record("k9", "point", "alice", &[(1.0, 2.0)])],
    ));
    panel.flush(&mut transport);
    assert_eq!(panel.entity(id).unwrap().record.key.as_deref(), Some("k9"));
    assert!(panel.status().error().is_none());

    panel.handle_sidebar_action(id, SidebarAction::Modify);
    panel.handle_sidebar_action(id, SidebarAction::Save);
    assert_eq!(queued(&panel), vec![Operation::Edit]);
    let url = &panel.persistence().pending().next().unwrap().url;
    assert!(url.contains("key=k9"));
}

#[test]
fn cancel_restores_record_and_queues_nothing() {
    let mut panel = panel();
    load(&mut panel, vec![record("a1", "point", "alice", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);
    let marker = panel.entity(id).unwrap().primary_overlay();

    panel.handle_sidebar_action(id, SidebarAction::Modify);
    assert!(panel.map_mut().drag_marker(marker, LatLng::new(4.0, 4.0)));
    panel.handle_map_event(MapEvent::DragEnd { overlay: marker });
    panel.handle_sidebar_action(id, SidebarAction::EditDescription("moved".into()));
    assert!(panel.entity(id).unwrap().is_edited);

    panel.handle_sidebar_action(id, SidebarAction::Cancel);

    let entity = panel.entity(id).unwrap();
    assert!(queued(&panel).is_empty());
    assert_eq!(entity.record.coordinates, vec![LatLng::new(1.0, 1.0)]);
    assert_eq!(entity.record.name, "a1 name");
    assert_eq!(entity.record.description, "a1 description");
    assert_eq!(panel.map().marker_position(marker), Some(LatLng::new(1.0, 1.0)));
    assert!(!entity.is_edited);
    assert!(!entity.is_editable);
    assert!(!panel.map().is_draggable(marker));
    assert_eq!(panel.selected(), None);
    assert!(panel.highlight_overlay().is_none());
    let entry = panel.entry(id).unwrap();
    assert_eq!(entry.state(), EntryState::Viewing);
    assert_eq!(entry.tint(), EntryTint::Plain);
}

#[test]
fn cancel_abandons_never_saved_geometry() {
    let mut panel = panel();
    panel.set_mode(Mode::Poly);
    click_map(&mut panel, 0.0, 0.0);
    let id = only_entity(&panel);

    panel.handle_sidebar_action(id, SidebarAction::Cancel);

    assert!(panel.entities().is_empty());
    assert!(panel.sidebar().is_empty());
    assert_eq!(panel.map().overlay_count(), 0);
    assert!(queued(&panel).is_empty());
    assert_eq!(panel.selected(), None);
}

#[test]
fn delete_removes_before_any_response() {
    let mut panel = panel();
    load(&mut panel, vec![record("a1", "line", "alice", &[(0.0, 0.0), (1.0, 1.0)])]);
    let id = only_entity(&panel);

    panel.handle_sidebar_action(id, SidebarAction::Modify);
    panel.handle_sidebar_action(id, SidebarAction::Delete);

    assert_eq!(queued(&panel), vec![Operation::Delete]);
    assert!(panel.entities().is_empty());
    assert!(panel.sidebar().is_empty());
    assert_eq!(panel.map().overlay_count(), 0);
    assert_eq!(panel.selected(), None);

    // A failed delete is reported, not rolled back
    let mut transport = ScriptedTransport::default();
    transport.fail("connection refused");
    panel.flush(&mut transport);
    assert!(panel.entities().is_empty());
    assert!(panel.status().error().unwrap().contains("connection refused"));
}

#[test]
fn form_actions_outside_edit_mode_are_ignored() {
    let mut panel = panel();
    load(&mut panel, vec![record("a1", "point", "alice", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);

    panel.handle_sidebar_action(id, SidebarAction::Save);
    panel.handle_sidebar_action(id, SidebarAction::Delete);
    panel.handle_sidebar_action(id, SidebarAction::EditName("x".into()));

    assert!(queued(&panel).is_empty());
    assert_eq!(panel.entities().len(), 1);
    assert!(!panel.entity(id).unwrap().is_edited);
}

#[test]
fn vertex_drag_rebuilds_shape_and_marks_dirty() {
    let mut panel = panel();
    load(
        &mut panel,
        vec![record("a1", "poly", "alice", &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)])],
    );
    let id = only_entity(&panel);
    panel.handle_sidebar_action(id, SidebarAction::Modify);

    let entity = panel.entity(id).unwrap();
    let markers = entity.vertex_markers().to_vec();
    let before = entity.editable_overlay().unwrap();
    assert!(markers.iter().all(|&m| panel.map().is_draggable(m)));

    assert!(panel.map_mut().drag_marker(markers[2], LatLng::new(3.0, 3.0)));
    panel.handle_map_event(MapEvent::DragEnd { overlay: markers[2] });

    let entity = panel.entity(id).unwrap();
    let after = entity.editable_overlay().unwrap();
    assert_ne!(before, after);
    assert_eq!(entity.vertex_markers(), markers.as_slice());
    assert_eq!(panel.map().overlay(after).unwrap().path()[2], LatLng::new(3.0, 3.0));
    assert!(entity.is_edited);
    assert_eq!(panel.entry(id).unwrap().tint(), EntryTint::Dirty);

    let highlight = panel.highlight_overlay().unwrap();
    match panel.map().overlay(highlight) {
        Some(Overlay::Polygon { path, style }) => {
            assert_eq!(path[1], LatLng::new(3.0, 3.0));
            assert_eq!(
                style.stroke.to_rgba8(),
                crate::theme::highlight::DIRTY.to_rgba8()
            );
        }
        other => panic!("unexpected highlight: {other:?}"),
    }
    assert_consistent(&panel);
}

#[test]
fn load_of_several_records_fits_viewport() {
    let mut panel = panel();
    let zoom_before = panel.map().zoom();
    load(
        &mut panel,
        vec![
            record("a", "point", "alice", &[(10.0, 10.0)]),
            record("b", "point", "bob", &[(30.0, 50.0)]),
            record("c", "line", "bob", &[(10.0, 10.0), (14.0, 12.0)]),
        ],
    );

    assert_eq!(panel.entities().len(), 3);
    assert_eq!(panel.map().center(), LatLng::new(20.0, 30.0));
    assert!(panel.map().zoom() < zoom_before);
    assert!(in_view(&panel, LatLng::new(30.0, 50.0)));
    assert!(in_view(&panel, LatLng::new(10.0, 10.0)));
    assert!(panel.status().last_synced().is_some());
    assert!(panel.entities().iter().all(|e| !e.is_editable && !e.is_edited));
    assert_consistent(&panel);
}

#[test]
fn load_of_one_record_keeps_viewport() {
    let mut panel = panel();
    let center = panel.map().center();
    let zoom = panel.map().zoom();
    load(&mut panel, vec![record("a", "point", "alice", &[(50.0, 50.0)])]);

    assert_eq!(panel.entities().len(), 1);
    assert_eq!(panel.map().center(), center);
    assert_eq!(panel.map().zoom(), zoom);
}

#[test]
fn malformed_records_are_skipped_and_reported() {
    let mut panel = panel();
    load(
        &mut panel,
        vec![
            record("a", "point", "alice", &[(1.0, 1.0)]),
            record("bad", "point", "alice", &[(1.0, 1.0), (2.0, 2.0)]),
            record("c", "line", "bob", &[(3.0, 3.0)]),
        ],
    );

    assert_eq!(panel.entities().len(), 2);
    assert!(panel.status().error().unwrap().contains("malformed record"));
    assert_consistent(&panel);
}

#[test]
fn server_rejection_is_reported() {
    let mut panel = panel();
    panel.load();
    let mut transport = ScriptedTransport::default();
    transport.respond(r#"{"status": "error", "operation": "get"}"#);
    panel.flush(&mut transport);

    assert!(panel.entities().is_empty());
    assert!(panel.status().error().unwrap().contains("rejected"));
    assert!(!panel.persistence().has_pending());
}

#[test]
fn zoom_redraws_point_highlight_without_changing_selection() {
    let mut panel = panel();
    load(&mut panel, vec![record("b1", "point", "bob", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);
    panel.handle_sidebar_action(id, SidebarAction::Click);

    let before = panel.highlight_overlay().unwrap();
    let height = |panel: &AdminPanel<HeadlessMap>, overlay: OverlayId| {
        let path = panel.map().overlay(overlay).unwrap().path().to_vec();
        path[2].lat - path[0].lat
    };
    let wide = height(&panel, before);

    let zoom = panel.map().zoom();
    panel.map_mut().set_zoom(zoom + 1);
    panel.handle_map_event(MapEvent::ZoomEnd);

    let after = panel.highlight_overlay().unwrap();
    assert_ne!(before, after);
    assert!(panel.map().overlay(before).is_none());
    assert!((wide / height(&panel, after) - 2.0).abs() < 1e-9);
    assert_eq!(panel.selected(), Some(id));
}

#[test]
fn import_place_creates_editable_point_in_any_mode() {
    let mut panel = panel();
    let id = panel.import_place("Coit Tower", "1 Telegraph Hill Blvd", LatLng::new(37.8, -122.4));

    let entity = panel.entity(id).unwrap();
    assert_eq!(panel.mode(), Mode::View);
    assert_eq!(entity.kind(), GeometryKind::Point);
    assert_eq!(entity.record.user_id, "alice");
    assert!(entity.is_editable);
    let form = panel.entry(id).unwrap().form().unwrap();
    assert_eq!(form.name, "Coit Tower");
    assert_eq!(form.description, "1 Telegraph Hill Blvd");
    assert_consistent(&panel);
}

#[test]
fn reload_replaces_clean_entities_by_key() {
    let mut panel = panel();
    let records = || {
        vec![
            record("a", "point", "alice", &[(1.0, 1.0)]),
            record("b", "line", "bob", &[(0.0, 0.0), (1.0, 1.0)]),
        ]
    };
    load(&mut panel, records());
    let overlays = panel.map().overlay_count();

    load(&mut panel, records());

    assert_eq!(panel.entities().len(), 2);
    let mut keys: Vec<_> = panel
        .entities()
        .iter()
        .map(|e| e.record.key.clone().unwrap())
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(panel.map().overlay_count(), overlays);
    assert_consistent(&panel);
}

#[test]
fn reload_keeps_entity_with_local_edits() {
    let mut panel = panel();
    load(&mut panel, vec![record("a", "point", "alice", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);
    panel.handle_sidebar_action(id, SidebarAction::Modify);
    panel.handle_sidebar_action(id, SidebarAction::EditName("typed".into()));

    let mut newer = record("a", "point", "alice", &[(5.0, 5.0)]);
    newer["name"] = json!("server name");
    load(&mut panel, vec![newer]);

    assert_eq!(only_entity(&panel), id);
    let entity = panel.entity(id).unwrap();
    assert!(entity.is_editable);
    assert_eq!(entity.record.coordinates, vec![LatLng::new(1.0, 1.0)]);
    assert_eq!(panel.entry(id).unwrap().form().unwrap().name, "typed");
    assert_consistent(&panel);
}

#[test]
fn modify_on_open_form_keeps_typed_text() {
    let mut panel = panel();
    load(&mut panel, vec![record("a1", "point", "alice", &[(1.0, 1.0)])]);
    let id = only_entity(&panel);

    panel.handle_sidebar_action(id, SidebarAction::Modify);
    panel.handle_sidebar_action(id, SidebarAction::EditName("typed".into()));
    panel.handle_sidebar_action(id, SidebarAction::Modify);

    let entry = panel.entry(id).unwrap();
    assert_eq!(entry.form().unwrap().name, "typed");
    assert_eq!(entry.tint(), EntryTint::Dirty);
    assert!(panel.entity(id).unwrap().is_edited);
}

#[test]
fn line_update_marks_editable_line_dirty() {
    let mut panel = panel();
    load(&mut panel, vec![record("a1", "line", "alice", &[(0.0, 0.0), (1.0, 1.0)])]);
    let id = only_entity(&panel);
    let line = panel.entity(id).unwrap().primary_overlay();

    // Read-only lines ignore native edits
    panel.handle_map_event(MapEvent::LineUpdated { overlay: line });
    assert!(!panel.entity(id).unwrap().is_edited);
    assert_eq!(panel.entry(id).unwrap().tint(), EntryTint::Plain);

    panel.handle_sidebar_action(id, SidebarAction::Modify);
    let before = panel.highlight_overlay().unwrap();
    panel.handle_map_event(MapEvent::LineUpdated { overlay: line });

    assert!(panel.entity(id).unwrap().is_edited);
    assert_eq!(panel.entry(id).unwrap().tint(), EntryTint::Dirty);
    let after = panel.highlight_overlay().unwrap();
    assert_ne!(before, after);
    assert!(panel.map().overlay(before).is_none());
    assert_consistent(&panel);
}

#[test]
fn end_line_on_foreign_line_changes_nothing() {
    let mut panel = panel();
    load(&mut panel, vec![record("b1", "line", "bob", &[(0.0, 0.0), (1.0, 1.0)])]);
    let id = only_entity(&panel);
    let line = panel.entity(id).unwrap().primary_overlay();
    panel.handle_sidebar_action(id, SidebarAction::Click);
    let highlight = panel.highlight_overlay();

    panel.handle_map_event(MapEvent::EndLine { overlay: line });

    let entity = panel.entity(id).unwrap();
    assert!(entity.has_ended);
    assert!(!entity.is_edited);
    assert_eq!(panel.entry(id).unwrap().tint(), EntryTint::Selected);
    assert_eq!(panel.highlight_overlay(), highlight);
    assert!(queued(&panel).is_empty());
}
