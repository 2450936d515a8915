//! The egui interface: side panel, marker naming popup, and error dialogs.
//!
//! ## Module Structure
//!
//! - [`side_panel`] - style settings, mode toggles, file ops, hexagon list
//! - [`marker_popup`] - naming popup opened by right click
//! - [`dialogs`] - save/load error dialogs

mod dialogs;
mod marker_popup;
mod side_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use marker_popup::MarkerPopup;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkerPopup>()
            .init_resource::<side_panel::SidePanelState>()
            // Side panel first so windows anchor inside the remaining space
            .add_systems(
                EguiPrimaryContextPass,
                (
                    side_panel::side_panel_ui,
                    marker_popup::marker_popup_ui,
                    dialogs::load_error_dialog_ui,
                    dialogs::save_error_dialog_ui,
                )
                    .chain(),
            );
    }
}
