//! Pure interaction controller: turns geographic input events into store
//! mutations and command-log entries according to the active mode.
//!
//! Everything here operates on the session and a render surface only, so the
//! whole state machine is unit-testable without a window.

use bevy::prelude::*;

use crate::constants::MARKER_HIT_RADIUS_KM;
use crate::geo::{self, LatLng};
use crate::history::MapCommand;
use crate::session::{
    AnnotationSession, AnnotationStore, EditorMode, HexagonEntity, LineEntity, RenderSurface,
};

/// Primary (left) click at a geographic coordinate.
pub fn primary_click(session: &mut AnnotationSession, surface: &mut dyn RenderSurface, at: LatLng) {
    match session.mode.clone() {
        EditorMode::Idle => toggle_hexagon(session, surface, at),
        // A map click with the popup open just closes it, like clicking Cancel
        EditorMode::PlacingMarker { .. } => session.mode = EditorMode::Idle,
        EditorMode::Measuring { start: None } => {
            session.mode = EditorMode::Measuring { start: Some(at) };
        }
        EditorMode::Measuring { start: Some(_) } => exit_measuring(session),
        // Strokes arrive as dedicated stroke events
        EditorMode::Drawing { .. } => {}
    }
}

/// Secondary (right) click when idle: delete the marker under the click if
/// there is one, otherwise open the naming popup for a new marker. Returns
/// true when the popup should open.
pub fn secondary_click(
    session: &mut AnnotationSession,
    surface: &mut dyn RenderSurface,
    at: LatLng,
) -> bool {
    if session.mode != EditorMode::Idle {
        return false;
    }
    if let Some(id) = marker_near(&session.store, at)
        && let Some(marker) = session.store.remove_marker(surface, id)
    {
        info!("Removed marker '{}' ({})", marker.label, marker.id);
        session.history.record(MapCommand::RemoveMarker { marker });
        return false;
    }
    session.mode = EditorMode::PlacingMarker { at };
    true
}

/// The closest marker within the hit radius of a coordinate, if any.
fn marker_near(store: &AnnotationStore, at: LatLng) -> Option<u64> {
    store
        .markers()
        .map(|m| (m.id, geo::great_circle_distance_km(m.position, at)))
        .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS_KM)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Toggle the hexagon covering the clicked coordinate at the current
/// resolution. Toggling off records a removal carrying the original styling,
/// so undo restores the hexagon exactly as it was placed.
fn toggle_hexagon(session: &mut AnnotationSession, surface: &mut dyn RenderSurface, at: LatLng) {
    let cell_id = match geo::cell_at(at, session.settings.resolution) {
        Ok(id) => id,
        Err(e) => {
            warn!("Ignoring click: {}", e);
            return;
        }
    };

    if let Some(removed) = session.store.remove_hexagon(surface, &cell_id) {
        info!("Removed hexagon {}", cell_id);
        session.history.record(MapCommand::RemoveHexagon { hexagon: removed });
    } else {
        let hexagon = HexagonEntity {
            cell_id: cell_id.clone(),
            anchor: at,
            resolution: session.settings.resolution,
            stroke_color: session.settings.stroke_color.clone(),
            fill_opacity: session.settings.fill_opacity,
        };
        if session.store.place_hexagon(surface, hexagon.clone()) {
            info!("Placed hexagon {}", cell_id);
            session.history.record(MapCommand::AddHexagon { hexagon });
        }
    }
}

/// Confirm the pending marker with the given name. Returns false (and keeps
/// the popup open) when the name is empty or no marker is pending.
pub fn confirm_marker(
    session: &mut AnnotationSession,
    surface: &mut dyn RenderSurface,
    name: &str,
) -> bool {
    let EditorMode::PlacingMarker { at } = session.mode.clone() else {
        return false;
    };
    let label = name.trim();
    if label.is_empty() {
        return false;
    }
    let marker = session.store.place_marker(surface, at, label.to_string());
    info!("Added marker '{}' ({})", marker.label, marker.id);
    session.history.record(MapCommand::AddMarker { marker });
    session.mode = EditorMode::Idle;
    true
}

/// Dismiss the pending marker popup without placing anything.
pub fn cancel_marker(session: &mut AnnotationSession) {
    if matches!(session.mode, EditorMode::PlacingMarker { .. }) {
        session.mode = EditorMode::Idle;
    }
}

/// Enter or leave drawing mode. Leaving discards any unfinished stroke
/// without recording; entering leaves measuring first (the two modes are
/// mutually exclusive).
pub fn toggle_drawing(session: &mut AnnotationSession) {
    if session.mode.is_drawing() {
        session.mode = EditorMode::Idle;
    } else {
        session.live_distance_km = None;
        session.mode = EditorMode::Drawing { stroke: Vec::new() };
    }
}

/// Enter or leave measuring mode. Entering exits drawing (unfinished stroke
/// discarded); leaving clears the guide line and readout.
pub fn toggle_measuring(session: &mut AnnotationSession) {
    if session.mode.is_measuring() {
        exit_measuring(session);
    } else {
        session.mode = EditorMode::Measuring { start: None };
    }
}

fn exit_measuring(session: &mut AnnotationSession) {
    session.mode = EditorMode::Idle;
    session.live_distance_km = None;
}

/// Escape hatch: back to idle from any mode, discarding pending state.
pub fn escape_to_idle(session: &mut AnnotationSession) {
    session.mode = EditorMode::Idle;
    session.live_distance_km = None;
}

/// Begin a freehand stroke. Ignored outside drawing mode.
pub fn stroke_start(session: &mut AnnotationSession, at: LatLng) {
    if let EditorMode::Drawing { stroke } = &mut session.mode {
        stroke.clear();
        stroke.push(at);
    }
}

/// Extend the in-progress stroke. Ignored when no stroke is live.
pub fn stroke_move(session: &mut AnnotationSession, at: LatLng) {
    if let EditorMode::Drawing { stroke } = &mut session.mode
        && !stroke.is_empty()
    {
        stroke.push(at);
    }
}

/// Finish the in-progress stroke: persist and record it when it has at
/// least two points, silently discard it otherwise.
pub fn stroke_end(session: &mut AnnotationSession, surface: &mut dyn RenderSurface) {
    let points = match &mut session.mode {
        EditorMode::Drawing { stroke } => std::mem::take(stroke),
        _ => return,
    };
    if points.len() < 2 {
        return;
    }
    let line = LineEntity {
        points,
        stroke_color: session.settings.stroke_color.clone(),
        weight: session.settings.stroke_weight,
    };
    session.store.append_line(surface, line.clone());
    info!("Drew line with {} points", line.points.len());
    session.history.record(MapCommand::DrawLine { line });
}

/// Cursor moved: update the coordinate readout and, while measuring with a
/// start point set, the live distance.
pub fn pointer_move(session: &mut AnnotationSession, at: LatLng) {
    session.cursor = Some(at);
    if let EditorMode::Measuring { start: Some(start) } = session.mode {
        session.live_distance_km = Some(geo::great_circle_distance_km(start, at));
    }
}
