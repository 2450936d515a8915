//! Unit tests for the command log.

use crate::geo::{self, LatLng};
use crate::session::{
    AnnotationStore, HexagonEntity, LineEntity, RecordingSurface, ShapeKind,
};

use super::command_history::CommandHistory;
use super::commands::MapCommand;
use super::execute::{redo, undo};
use super::MAX_HISTORY_SIZE;

const BERLIN: LatLng = LatLng {
    lat: 52.5200,
    lng: 13.4050,
};

fn hexagon(color: &str, opacity: f32) -> HexagonEntity {
    HexagonEntity {
        cell_id: geo::cell_at(BERLIN, 9).unwrap(),
        anchor: BERLIN,
        resolution: 9,
        stroke_color: color.to_string(),
        fill_opacity: opacity,
    }
}

fn sample_line() -> LineEntity {
    LineEntity {
        points: vec![
            LatLng::new(52.0, 13.0),
            LatLng::new(52.1, 13.1),
            LatLng::new(52.2, 13.2),
        ],
        stroke_color: "#00ff00".to_string(),
        weight: 3,
    }
}

#[test]
fn test_record_clears_redo() {
    let mut history = CommandHistory::default();
    history.record(MapCommand::DrawLine { line: sample_line() });
    history.record(MapCommand::DrawLine { line: sample_line() });

    let undone = history.pop_undo().unwrap();
    history.push_redo(undone);
    assert!(history.can_redo());

    history.record(MapCommand::DrawLine { line: sample_line() });
    assert!(!history.can_redo());
}

#[test]
fn test_history_is_capped() {
    let mut history = CommandHistory::default();
    for _ in 0..(MAX_HISTORY_SIZE + 50) {
        history.record(MapCommand::DrawLine { line: sample_line() });
    }
    assert_eq!(history.undo_count(), MAX_HISTORY_SIZE);
}

#[test]
fn test_undo_redo_on_empty_stacks_is_a_noop() {
    let mut store = AnnotationStore::default();
    let mut history = CommandHistory::default();
    let mut surface = RecordingSurface::default();

    undo(&mut store, &mut history, &mut surface);
    redo(&mut store, &mut history, &mut surface);
    assert!(store.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_undo_restores_original_hexagon_styling() {
    let mut store = AnnotationStore::default();
    let mut history = CommandHistory::default();
    let mut surface = RecordingSurface::default();

    // Place with one styling, toggle off, then undo the removal. The
    // restored hexagon must carry the recorded styling, not whatever the
    // sliders say at undo time.
    let original = hexagon("#123456", 0.7);
    store.place_hexagon(&mut surface, original.clone());
    history.record(MapCommand::AddHexagon {
        hexagon: original.clone(),
    });

    let removed = store.remove_hexagon(&mut surface, &original.cell_id).unwrap();
    history.record(MapCommand::RemoveHexagon { hexagon: removed });

    undo(&mut store, &mut history, &mut surface);
    let restored = store.hexagon(&original.cell_id).unwrap();
    assert_eq!(restored.stroke_color, "#123456");
    assert_eq!(restored.fill_opacity, 0.7);

    redo(&mut store, &mut history, &mut surface);
    assert!(!store.contains_hexagon(&original.cell_id));
}

#[test]
fn test_undo_redo_inverse_law_over_mixed_sequence() {
    let mut store = AnnotationStore::default();
    let mut history = CommandHistory::default();
    let mut surface = RecordingSurface::default();

    // A mixed sequence of recorded mutations, as the controller would
    // produce them
    let hex = hexagon("#0000ff", 0.3);
    store.place_hexagon(&mut surface, hex.clone());
    history.record(MapCommand::AddHexagon {
        hexagon: hex.clone(),
    });

    let marker = store.place_marker(&mut surface, BERLIN, "Home".to_string());
    history.record(MapCommand::AddMarker {
        marker: marker.clone(),
    });

    store.append_line(&mut surface, sample_line());
    history.record(MapCommand::DrawLine { line: sample_line() });

    let removed = store.remove_marker(&mut surface, marker.id).unwrap();
    history.record(MapCommand::RemoveMarker { marker: removed });

    let snapshot_hexagons: Vec<_> = store.hexagons().cloned().collect();
    let snapshot_markers: Vec<_> = store.markers().cloned().collect();
    let snapshot_lines = store.lines().to_vec();
    let n = history.undo_count();

    for _ in 0..n {
        undo(&mut store, &mut history, &mut surface);
    }
    assert!(store.is_empty());
    assert_eq!(history.redo_count(), n);

    for _ in 0..n {
        redo(&mut store, &mut history, &mut surface);
    }
    assert_eq!(store.hexagons().cloned().collect::<Vec<_>>(), snapshot_hexagons);
    assert_eq!(store.markers().cloned().collect::<Vec<_>>(), snapshot_markers);
    assert_eq!(store.lines(), snapshot_lines.as_slice());
    assert_eq!(history.undo_count(), n);
}

#[test]
fn test_marker_id_survives_undo_redo() {
    let mut store = AnnotationStore::default();
    let mut history = CommandHistory::default();
    let mut surface = RecordingSurface::default();

    let marker = store.place_marker(&mut surface, BERLIN, "Home".to_string());
    history.record(MapCommand::AddMarker {
        marker: marker.clone(),
    });

    undo(&mut store, &mut history, &mut surface);
    assert_eq!(store.marker_count(), 0);

    redo(&mut store, &mut history, &mut surface);
    assert_eq!(store.markers().next().map(|m| m.id), Some(marker.id));
}

#[test]
fn test_draw_line_undo_pops_newest_line() {
    let mut store = AnnotationStore::default();
    let mut history = CommandHistory::default();
    let mut surface = RecordingSurface::default();

    let first = sample_line();
    let mut second = sample_line();
    second.stroke_color = "#ffffff".to_string();

    store.append_line(&mut surface, first.clone());
    history.record(MapCommand::DrawLine { line: first.clone() });
    store.append_line(&mut surface, second.clone());
    history.record(MapCommand::DrawLine { line: second });

    undo(&mut store, &mut history, &mut surface);
    assert_eq!(store.lines(), std::slice::from_ref(&first));
    assert_eq!(surface.count(ShapeKind::Polyline), 1);
}

#[test]
fn test_replay_after_external_clear_is_safe() {
    let mut store = AnnotationStore::default();
    let mut history = CommandHistory::default();
    let mut surface = RecordingSurface::default();

    let hex = hexagon("#0000ff", 0.3);
    store.place_hexagon(&mut surface, hex.clone());
    history.record(MapCommand::AddHexagon { hexagon: hex });

    // A document load may clear state while commands are still stacked;
    // replaying afterwards must not error
    store.clear_all(&mut surface);
    undo(&mut store, &mut history, &mut surface);
    assert!(store.is_empty());
}
