//! Bevy system for the undo/redo keyboard shortcuts.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::render::MapSurface;
use crate::session::AnnotationSession;

use super::execute::{redo, undo};

/// Ctrl+Z undoes, Ctrl+Y or Ctrl+Shift+Z redoes.
pub fn handle_undo_redo_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<AnnotationSession>,
    mut surface: ResMut<MapSurface>,
    mut contexts: EguiContexts,
) {
    // Don't steal shortcuts from a focused text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    let session = &mut *session;
    if ctrl && !shift && keyboard.just_pressed(KeyCode::KeyZ) {
        undo(&mut session.store, &mut session.history, &mut *surface);
    }

    let redo_pressed = (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ));
    if redo_pressed {
        redo(&mut session.store, &mut session.history, &mut *surface);
    }
}
