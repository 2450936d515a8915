//! Error dialogs for failed document operations.

use bevy_egui::{egui, EguiContexts};

use crate::document::{DocLoadError, DocSaveError};

use bevy::prelude::*;

pub fn load_error_dialog_ui(
    mut contexts: EguiContexts,
    mut load_error: ResMut<DocLoadError>,
) -> Result {
    let Some(message) = load_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Load Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(egui::Color32::RED, &message);
            });
            ui.add_space(5.0);
            ui.label("The current annotations were left unchanged.");
            if ui.button("Dismiss").clicked() {
                load_error.message = None;
            }
        });

    Ok(())
}

pub fn save_error_dialog_ui(
    mut contexts: EguiContexts,
    mut save_error: ResMut<DocSaveError>,
) -> Result {
    let Some(message) = save_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Save Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(egui::Color32::RED, &message);
            });
            ui.add_space(5.0);
            if ui.button("Dismiss").clicked() {
                save_error.message = None;
            }
        });

    Ok(())
}
