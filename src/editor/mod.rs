//! Interaction layer: the mode state machine's transitions and the Bevy
//! systems that feed it input.
//!
//! ## Module Structure
//!
//! - [`controller`] - pure transition functions over the session
//! - [`input`] - cursor/mouse/keyboard systems calling the controller
//! - [`camera`] - 2D map camera with pan and zoom

pub mod controller;

mod camera;
mod input;

#[cfg(test)]
mod tests;

pub use camera::MapCamera;

use bevy::prelude::*;

use crate::history;
use crate::session::AnnotationSession;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnnotationSession>()
            .add_systems(Startup, camera::spawn_camera)
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    input::track_pointer,
                    input::handle_mouse,
                    input::handle_mode_keys,
                    history::handle_undo_redo_keys,
                ),
            );
    }
}
