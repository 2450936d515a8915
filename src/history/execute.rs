//! Forward and inverse application of commands against the store.
//!
//! Replay goes straight to the store and never back through `record`, so
//! undo/redo cannot generate new history entries.

use bevy::prelude::*;

use crate::session::{AnnotationStore, RenderSurface};

use super::command_history::CommandHistory;
use super::commands::MapCommand;

/// Apply a command forward (the original user mutation).
pub(crate) fn apply_forward(
    command: &MapCommand,
    store: &mut AnnotationStore,
    surface: &mut dyn RenderSurface,
) {
    match command {
        MapCommand::AddHexagon { hexagon } => {
            store.place_hexagon(surface, hexagon.clone());
        }
        MapCommand::RemoveHexagon { hexagon } => {
            store.remove_hexagon(surface, &hexagon.cell_id);
        }
        MapCommand::AddMarker { marker } => {
            store.restore_marker(surface, marker.clone());
        }
        MapCommand::RemoveMarker { marker } => {
            store.remove_marker(surface, marker.id);
        }
        MapCommand::DrawLine { line } => {
            store.append_line(surface, line.clone());
        }
    }
}

/// Apply a command's exact inverse.
pub(crate) fn apply_inverse(
    command: &MapCommand,
    store: &mut AnnotationStore,
    surface: &mut dyn RenderSurface,
) {
    match command {
        MapCommand::AddHexagon { hexagon } => {
            store.remove_hexagon(surface, &hexagon.cell_id);
        }
        MapCommand::RemoveHexagon { hexagon } => {
            store.place_hexagon(surface, hexagon.clone());
        }
        MapCommand::AddMarker { marker } => {
            store.remove_marker(surface, marker.id);
        }
        MapCommand::RemoveMarker { marker } => {
            store.restore_marker(surface, marker.clone());
        }
        MapCommand::DrawLine { .. } => {
            // Position-based inverse: the top of the line list is the line
            // this command appended, as long as undo order stays LIFO
            store.remove_last_line(surface);
        }
    }
}

/// Undo the most recent command. No-op on an empty undo stack.
pub fn undo(
    store: &mut AnnotationStore,
    history: &mut CommandHistory,
    surface: &mut dyn RenderSurface,
) {
    if let Some(command) = history.pop_undo() {
        debug!("Undo: {:?}", command);
        apply_inverse(&command, store, surface);
        history.push_redo(command);
    }
}

/// Re-apply the most recently undone command. No-op on an empty redo stack.
pub fn redo(
    store: &mut AnnotationStore,
    history: &mut CommandHistory,
    surface: &mut dyn RenderSurface,
) {
    if let Some(command) = history.pop_redo() {
        debug!("Redo: {:?}", command);
        apply_forward(&command, store, surface);
        history.push_undo(command);
    }
}
