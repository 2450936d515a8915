//! Unit tests for the interaction controller state machine.

use crate::geo::{self, LatLng};
use crate::history::{redo, undo};
use crate::session::{AnnotationSession, EditorMode, RecordingSurface, ShapeKind};

use super::controller::{
    cancel_marker, confirm_marker, escape_to_idle, pointer_move, primary_click, secondary_click,
    stroke_end, stroke_move, stroke_start, toggle_drawing, toggle_measuring,
};

const BERLIN: LatLng = LatLng {
    lat: 52.5200,
    lng: 13.4050,
};
const PARIS: LatLng = LatLng {
    lat: 48.8566,
    lng: 2.3522,
};

fn session() -> (AnnotationSession, RecordingSurface) {
    (AnnotationSession::default(), RecordingSurface::default())
}

#[test]
fn test_click_toggles_hexagon() {
    let (mut session, mut surface) = session();

    // Place a hexagon at resolution 9 covering Berlin
    primary_click(&mut session, &mut surface, BERLIN);
    let cell_id = geo::cell_at(BERLIN, 9).unwrap();
    assert_eq!(session.store.hexagon_count(), 1);
    assert!(session.store.contains_hexagon(&cell_id));

    // A second click on the same cell (slightly different coordinate)
    // toggles it off
    primary_click(&mut session, &mut surface, LatLng::new(52.52001, 13.40501));
    assert_eq!(session.store.hexagon_count(), 0);

    // Undo restores it with its original styling, redo removes it again
    undo(&mut session.store, &mut session.history, &mut surface);
    let restored = session.store.hexagon(&cell_id).unwrap();
    assert_eq!(restored.stroke_color, "#0000ff");
    assert_eq!(restored.fill_opacity, 0.3);

    redo(&mut session.store, &mut session.history, &mut surface);
    assert_eq!(session.store.hexagon_count(), 0);
}

#[test]
fn test_toggle_off_records_placement_styling_not_current_settings() {
    let (mut session, mut surface) = session();

    session.settings.stroke_color = "#ff0000".to_string();
    session.settings.fill_opacity = 0.8;
    primary_click(&mut session, &mut surface, BERLIN);

    // User fiddles with the sliders, then toggles the hexagon off
    session.settings.stroke_color = "#00ff00".to_string();
    session.settings.fill_opacity = 0.1;
    primary_click(&mut session, &mut surface, BERLIN);
    assert_eq!(session.store.hexagon_count(), 0);

    // Undo must restore the styling the hexagon was placed with
    undo(&mut session.store, &mut session.history, &mut surface);
    let cell_id = geo::cell_at(BERLIN, 9).unwrap();
    let restored = session.store.hexagon(&cell_id).unwrap();
    assert_eq!(restored.stroke_color, "#ff0000");
    assert_eq!(restored.fill_opacity, 0.8);
}

#[test]
fn test_marker_popup_flow() {
    let (mut session, mut surface) = session();

    assert!(secondary_click(&mut session, &mut surface, PARIS));
    assert_eq!(session.mode, EditorMode::PlacingMarker { at: PARIS });

    // Empty or whitespace names are refused and the popup stays open
    assert!(!confirm_marker(&mut session, &mut surface, ""));
    assert!(!confirm_marker(&mut session, &mut surface, "   "));
    assert!(matches!(session.mode, EditorMode::PlacingMarker { .. }));
    assert_eq!(session.store.marker_count(), 0);

    assert!(confirm_marker(&mut session, &mut surface, "Home"));
    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.store.marker_count(), 1);
    let marker = session.store.markers().next().unwrap();
    assert_eq!(marker.label, "Home");
    assert_eq!(marker.position, PARIS);
    assert!(session.history.can_undo());
}

#[test]
fn test_marker_popup_cancel_mutates_nothing() {
    let (mut session, mut surface) = session();

    secondary_click(&mut session, &mut surface, PARIS);
    cancel_marker(&mut session);
    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.store.marker_count(), 0);
    assert!(!session.history.can_undo());

    // A map click with the popup open also just closes it
    secondary_click(&mut session, &mut surface, PARIS);
    primary_click(&mut session, &mut surface, BERLIN);
    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.store.hexagon_count(), 0);
    assert_eq!(session.store.marker_count(), 0);
}

#[test]
fn test_right_click_on_marker_deletes_it() {
    let (mut session, mut surface) = session();

    secondary_click(&mut session, &mut surface, PARIS);
    assert!(confirm_marker(&mut session, &mut surface, "Home"));
    let original = session.store.markers().next().unwrap().clone();

    // Right-clicking a few meters from the marker deletes it instead of
    // opening the popup
    let nearby = LatLng::new(PARIS.lat + 0.0001, PARIS.lng);
    assert!(!secondary_click(&mut session, &mut surface, nearby));
    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.store.marker_count(), 0);
    assert_eq!(surface.count(ShapeKind::MarkerPin), 0);

    // Undo restores the marker with its original id and label
    undo(&mut session.store, &mut session.history, &mut surface);
    let restored = session.store.markers().next().unwrap();
    assert_eq!(restored.id, original.id);
    assert_eq!(restored.label, "Home");
    assert_eq!(surface.count(ShapeKind::MarkerPin), 1);

    redo(&mut session.store, &mut session.history, &mut surface);
    assert_eq!(session.store.marker_count(), 0);
}

#[test]
fn test_right_click_away_from_markers_opens_popup() {
    let (mut session, mut surface) = session();

    secondary_click(&mut session, &mut surface, PARIS);
    assert!(confirm_marker(&mut session, &mut surface, "Home"));

    // Berlin is nowhere near the Paris marker
    assert!(secondary_click(&mut session, &mut surface, BERLIN));
    assert_eq!(session.mode, EditorMode::PlacingMarker { at: BERLIN });
    assert_eq!(session.store.marker_count(), 1);
}

#[test]
fn test_five_point_stroke_with_undo_redo() {
    let (mut session, mut surface) = session();

    toggle_drawing(&mut session);
    stroke_start(&mut session, LatLng::new(52.0, 13.0));
    for i in 1..5 {
        stroke_move(&mut session, LatLng::new(52.0 + i as f64 * 0.001, 13.0));
    }
    stroke_end(&mut session, &mut surface);

    assert_eq!(session.store.line_count(), 1);
    assert_eq!(session.store.lines()[0].points.len(), 5);
    assert_eq!(session.history.undo_count(), 1);

    undo(&mut session.store, &mut session.history, &mut surface);
    assert_eq!(session.store.line_count(), 0);

    redo(&mut session.store, &mut session.history, &mut surface);
    assert_eq!(session.store.line_count(), 1);
    assert_eq!(session.store.lines()[0].points.len(), 5);
}

#[test]
fn test_degenerate_stroke_is_discarded() {
    let (mut session, mut surface) = session();

    toggle_drawing(&mut session);
    stroke_start(&mut session, BERLIN);
    stroke_end(&mut session, &mut surface);

    assert_eq!(session.store.line_count(), 0);
    assert!(!session.history.can_undo());
    // Mode stays armed for the next stroke with an empty buffer
    assert_eq!(session.mode, EditorMode::Drawing { stroke: vec![] });
}

#[test]
fn test_leaving_drawing_mode_discards_unfinished_stroke() {
    let (mut session, mut surface) = session();

    toggle_drawing(&mut session);
    stroke_start(&mut session, BERLIN);
    stroke_move(&mut session, PARIS);
    toggle_drawing(&mut session);

    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.store.line_count(), 0);
    assert!(!session.history.can_undo());
    assert_eq!(surface.count(ShapeKind::Polyline), 0);
}

#[test]
fn test_clicks_in_drawing_mode_do_not_place_hexagons() {
    let (mut session, mut surface) = session();

    toggle_drawing(&mut session);
    primary_click(&mut session, &mut surface, BERLIN);
    assert_eq!(session.store.hexagon_count(), 0);
}

#[test]
fn test_measuring_flow_records_nothing() {
    let (mut session, mut surface) = session();

    toggle_measuring(&mut session);
    assert_eq!(session.mode, EditorMode::Measuring { start: None });

    primary_click(&mut session, &mut surface, BERLIN);
    assert_eq!(session.mode, EditorMode::Measuring { start: Some(BERLIN) });

    pointer_move(&mut session, PARIS);
    let readout = session.live_distance_km.unwrap();
    assert!(readout > 850.0 && readout < 900.0);

    // Second click leaves measuring entirely and clears the readout
    primary_click(&mut session, &mut surface, PARIS);
    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.live_distance_km, None);

    // Measurement is never persisted or recorded
    assert!(session.store.is_empty());
    assert!(!session.history.can_undo());
}

#[test]
fn test_drawing_and_measuring_are_mutually_exclusive() {
    let (mut session, _) = session();

    toggle_drawing(&mut session);
    toggle_measuring(&mut session);
    assert_eq!(session.mode, EditorMode::Measuring { start: None });

    toggle_drawing(&mut session);
    assert!(session.mode.is_drawing());
}

#[test]
fn test_escape_resets_any_mode() {
    let (mut session, mut surface) = session();

    secondary_click(&mut session, &mut surface, BERLIN);
    escape_to_idle(&mut session);
    assert_eq!(session.mode, EditorMode::Idle);

    toggle_measuring(&mut session);
    pointer_move(&mut session, PARIS);
    escape_to_idle(&mut session);
    assert_eq!(session.mode, EditorMode::Idle);
    assert_eq!(session.live_distance_km, None);
}

#[test]
fn test_pointer_move_updates_cursor_readout() {
    let (mut session, _) = session();
    pointer_move(&mut session, BERLIN);
    assert_eq!(session.cursor, Some(BERLIN));
}
