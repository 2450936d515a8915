//! Left side panel: style settings, mode toggles, file operations, the
//! measuring readout, and the hexagon list.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::common::{hex_to_rgb, rgb_to_hex};
use crate::constants::{HOVER_FILL_OPACITY, MAX_RESOLUTION};
use crate::document::{
    AsyncDocOperation, CurrentDocumentFile, LoadDocumentRequest, NewDocumentRequest,
    SaveDocumentRequest,
};
use crate::history;
use crate::render::MapSurface;
use crate::session::{AnnotationSession, ShapeStyle};

/// Transient panel state. Tracks which hexagon row is hovered so its fill
/// can be restored when the pointer leaves.
#[derive(Resource, Default)]
pub struct SidePanelState {
    hovered_cell: Option<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn side_panel_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<AnnotationSession>,
    mut surface: ResMut<MapSurface>,
    mut panel: ResMut<SidePanelState>,
    mut save_events: MessageWriter<SaveDocumentRequest>,
    mut load_events: MessageWriter<LoadDocumentRequest>,
    mut new_events: MessageWriter<NewDocumentRequest>,
    async_op: Res<AsyncDocOperation>,
    current_file: Res<CurrentDocumentFile>,
) -> Result {
    let session = &mut *session;

    egui::SidePanel::left("annotation_panel")
        .default_width(240.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(6.0);
            ui.heading("Hexmark");
            ui.separator();

            file_section(
                ui,
                &async_op,
                &current_file,
                &mut save_events,
                &mut load_events,
                &mut new_events,
            );
            ui.separator();

            style_section(ui, session);
            ui.separator();

            mode_section(ui, session);
            ui.separator();

            history_section(ui, session, &mut *surface);
            ui.separator();

            readout_section(ui, session);
            ui.separator();

            hexagon_list(ui, session, &mut *surface, &mut panel);
            ui.separator();

            help_section(ui);
        });

    Ok(())
}

fn file_section(
    ui: &mut egui::Ui,
    async_op: &AsyncDocOperation,
    current_file: &CurrentDocumentFile,
    save_events: &mut MessageWriter<SaveDocumentRequest>,
    load_events: &mut MessageWriter<LoadDocumentRequest>,
    new_events: &mut MessageWriter<NewDocumentRequest>,
) {
    ui.horizontal(|ui| {
        let enabled = !async_op.is_busy();

        if ui.add_enabled(enabled, egui::Button::new("New")).clicked() {
            new_events.write(NewDocumentRequest);
        }
        if ui.add_enabled(enabled, egui::Button::new("Save...")).clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("GeoJSON", &["geojson", "json"])
                .set_file_name("annotations.geojson")
                .set_title("Save Annotations")
                .save_file()
        {
            save_events.write(SaveDocumentRequest { path });
        }
        if ui.add_enabled(enabled, egui::Button::new("Load...")).clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("GeoJSON", &["geojson", "json"])
                .set_title("Load Annotations")
                .pick_file()
        {
            load_events.write(LoadDocumentRequest { path });
        }
    });

    if let Some(description) = &async_op.operation_description {
        ui.label(egui::RichText::new(description).color(egui::Color32::LIGHT_GRAY));
    } else if let Some(path) = &current_file.path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ui.label(egui::RichText::new(name).color(egui::Color32::LIGHT_GRAY));
    }
}

fn style_section(ui: &mut egui::Ui, session: &mut AnnotationSession) {
    ui.label(egui::RichText::new("Style").strong());

    ui.horizontal(|ui| {
        ui.label("Resolution:");
        ui.add(egui::Slider::new(
            &mut session.settings.resolution,
            0..=MAX_RESOLUTION,
        ));
    });

    ui.horizontal(|ui| {
        ui.label("Color:");
        // The settings store hex strings; the picker works in RGB bytes
        let mut rgb = hex_to_rgb(&session.settings.stroke_color).unwrap_or([0, 0, 255]);
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            session.settings.stroke_color = rgb_to_hex(rgb);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Fill opacity:");
        ui.add(egui::Slider::new(&mut session.settings.fill_opacity, 0.0..=1.0));
    });

    ui.horizontal(|ui| {
        ui.label("Line weight:");
        ui.add(egui::Slider::new(&mut session.settings.stroke_weight, 1..=10));
    });
}

fn mode_section(ui: &mut egui::Ui, session: &mut AnnotationSession) {
    use crate::editor::controller;

    ui.label(egui::RichText::new("Mode").strong());
    ui.horizontal(|ui| {
        let drawing = session.mode.is_drawing();
        if ui
            .add(egui::Button::new("Draw (D)").selected(drawing))
            .clicked()
        {
            controller::toggle_drawing(session);
        }

        let measuring = session.mode.is_measuring();
        if ui
            .add(egui::Button::new("Measure (M)").selected(measuring))
            .clicked()
        {
            controller::toggle_measuring(session);
        }
    });
}

fn history_section(
    ui: &mut egui::Ui,
    session: &mut AnnotationSession,
    surface: &mut MapSurface,
) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(session.history.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            history::undo(&mut session.store, &mut session.history, surface);
        }
        if ui
            .add_enabled(session.history.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            history::redo(&mut session.store, &mut session.history, surface);
        }
    });
}

fn readout_section(ui: &mut egui::Ui, session: &AnnotationSession) {
    if let Some(cursor) = session.cursor {
        ui.label(format!("Cursor: {:.4}, {:.4}", cursor.lat, cursor.lng));
    } else {
        ui.label("Cursor: outside map");
    }

    if let Some(km) = session.live_distance_km {
        ui.label(
            egui::RichText::new(format!("Distance: {:.2} km", km))
                .color(egui::Color32::LIGHT_GREEN),
        );
    }
}

fn help_section(ui: &mut egui::Ui) {
    ui.collapsing("Help", |ui| {
        let controls = [
            ("Left click", "place or remove a hexagon"),
            ("Right click", "add a marker, or delete the one under the cursor"),
            ("D", "toggle freehand drawing"),
            ("M", "toggle distance measuring"),
            ("Escape", "back to idle, discarding pending input"),
            ("Ctrl+Z / Ctrl+Y", "undo / redo"),
            ("Middle drag", "pan the map"),
            ("Scroll", "zoom"),
        ];
        egui::Grid::new("help_controls").num_columns(2).show(ui, |ui| {
            for (input, action) in controls {
                ui.label(egui::RichText::new(input).strong());
                ui.label(action);
                ui.end_row();
            }
        });
    });
}

fn hexagon_list(
    ui: &mut egui::Ui,
    session: &mut AnnotationSession,
    surface: &mut MapSurface,
    panel: &mut SidePanelState,
) {
    use crate::session::RenderSurface;

    ui.label(egui::RichText::new(format!(
        "Hexagons ({})",
        session.store.hexagon_count()
    ))
    .strong());

    let mut hovered_now: Option<String> = None;

    egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
        for hexagon in session.store.hexagons() {
            let response = ui.label(format!(
                "{}  ({:.4}, {:.4})",
                hexagon.cell_id, hexagon.anchor.lat, hexagon.anchor.lng
            ));
            if response.hovered() {
                hovered_now = Some(hexagon.cell_id.clone());
            }
        }
    });

    if panel.hovered_cell == hovered_now {
        return;
    }

    // Restore the previously highlighted cell before highlighting the new
    // one; a cell can disappear between frames (undo, load), so both
    // lookups are fallible
    if let Some(cell_id) = panel.hovered_cell.take()
        && let (Some(hexagon), Some(handle)) = (
            session.store.hexagon(&cell_id),
            session.store.hexagon_handle(&cell_id),
        )
    {
        surface.restyle_shape(
            handle,
            ShapeStyle {
                stroke_color: hexagon.stroke_color.clone(),
                fill_opacity: hexagon.fill_opacity,
                ..Default::default()
            },
        );
    }

    if let Some(cell_id) = hovered_now
        && let (Some(hexagon), Some(handle)) = (
            session.store.hexagon(&cell_id),
            session.store.hexagon_handle(&cell_id),
        )
    {
        surface.restyle_shape(
            handle,
            ShapeStyle {
                stroke_color: hexagon.stroke_color.clone(),
                fill_opacity: HOVER_FILL_OPACITY,
                ..Default::default()
            },
        );
        panel.hovered_cell = Some(cell_id);
    }
}
