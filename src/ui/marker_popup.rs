//! Popup for naming a marker after a right click.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::controller;
use crate::render::MapSurface;
use crate::session::{AnnotationSession, EditorMode};

/// State of the marker naming popup. Opened by the right-click handler at
/// the click's screen position; the geographic anchor lives in the editor
/// mode, not here.
#[derive(Resource, Default)]
pub struct MarkerPopup {
    pub is_open: bool,
    pub screen_pos: Vec2,
    pub name_buffer: String,
}

impl MarkerPopup {
    pub fn open_at(&mut self, screen_pos: Vec2) {
        self.is_open = true;
        self.screen_pos = screen_pos;
        self.name_buffer.clear();
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.name_buffer.clear();
    }
}

pub fn marker_popup_ui(
    mut contexts: EguiContexts,
    mut popup: ResMut<MarkerPopup>,
    mut session: ResMut<AnnotationSession>,
    mut surface: ResMut<MapSurface>,
) -> Result {
    if !popup.is_open {
        return Ok(());
    }
    // If something else closed the placement (Escape, a map click), the
    // popup has nothing to confirm anymore
    if !matches!(session.mode, EditorMode::PlacingMarker { .. }) {
        popup.close();
        return Ok(());
    }

    let mut confirm = false;
    let mut cancel = false;

    egui::Window::new("New Marker")
        .collapsible(false)
        .resizable(false)
        .fixed_pos(egui::pos2(popup.screen_pos.x, popup.screen_pos.y))
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                let response = ui.text_edit_singleline(&mut popup.name_buffer);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirm = true;
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        // An empty name is refused; the popup stays open for another try
        let name = popup.name_buffer.clone();
        if controller::confirm_marker(&mut session, &mut *surface, &name) {
            popup.close();
        }
    } else if cancel {
        controller::cancel_marker(&mut session);
        popup.close();
    }

    Ok(())
}
