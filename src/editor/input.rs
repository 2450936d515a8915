//! Bevy systems translating raw window input into controller calls.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::constants::MIN_STROKE_STEP;
use crate::geo::LatLng;
use crate::render::{geo_to_world, world_to_geo, MapSurface};
use crate::session::{AnnotationSession, EditorMode};
use crate::ui::MarkerPopup;

use super::camera::MapCamera;
use super::controller;

/// Resolve the cursor to a geographic coordinate through the map camera.
fn cursor_geo_position(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<(LatLng, Vec2)> {
    let cursor_pos = window.cursor_position()?;
    let world_pos = camera.viewport_to_world_2d(camera_transform, cursor_pos).ok()?;
    Some((world_to_geo(world_pos), world_pos))
}

/// Keep the coordinate readout and the measuring guide up to date.
pub fn track_pointer(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut session: ResMut<AnnotationSession>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some((at, _)) = cursor_geo_position(window, camera, camera_transform) else {
        return;
    };
    controller::pointer_move(&mut session, at);
}

/// Mouse buttons: primary clicks, marker deletion or popup opening on
/// right click, press/drag/release stroke capture while drawing.
#[allow(clippy::too_many_arguments)]
pub fn handle_mouse(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut session: ResMut<AnnotationSession>,
    mut surface: ResMut<MapSurface>,
    mut popup: ResMut<MarkerPopup>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some((at, world_pos)) = cursor_geo_position(window, camera, camera_transform) else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        if session.mode.is_drawing() {
            controller::stroke_start(&mut session, at);
        } else {
            controller::primary_click(&mut session, &mut *surface, at);
        }
    } else if mouse_button.pressed(MouseButton::Left) && session.mode.is_drawing() {
        // Only capture a point once the cursor traveled far enough,
        // keeping stroke point counts reasonable
        let far_enough = match &session.mode {
            EditorMode::Drawing { stroke } => stroke
                .last()
                .is_some_and(|last| geo_to_world(*last).distance(world_pos) > MIN_STROKE_STEP),
            _ => false,
        };
        if far_enough {
            controller::stroke_move(&mut session, at);
        }
    } else if mouse_button.just_released(MouseButton::Left) && session.mode.is_drawing() {
        controller::stroke_end(&mut session, &mut *surface);
    }

    if mouse_button.just_pressed(MouseButton::Right)
        && session.mode == EditorMode::Idle
        && controller::secondary_click(&mut session, &mut *surface, at)
        && let Some(cursor_pos) = window.cursor_position()
    {
        popup.open_at(cursor_pos);
    }
}

/// Mode shortcuts: D toggles drawing, M toggles measuring, Escape bails
/// out of whatever is pending.
pub fn handle_mode_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<AnnotationSession>,
    mut contexts: EguiContexts,
) {
    // Don't change modes while typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyD) {
        controller::toggle_drawing(&mut session);
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        controller::toggle_measuring(&mut session);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        controller::escape_to_idle(&mut session);
    }
}
