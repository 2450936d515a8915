//! Gizmo rendering of placed shapes, in-progress mode previews, and the
//! egui overlay for marker labels.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::{geo_to_world, SurfaceShape};
use crate::common::hex_to_color;
use crate::constants::DEFAULT_STROKE_WEIGHT;
use crate::editor::MapCamera;
use crate::session::{AnnotationSession, EditorMode, ShapeGeometry, ShapeKind};

const MARKER_PIN_RADIUS: f32 = 6.0;
const MARKER_PIN_STEM: f32 = 14.0;
const MARKER_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);
const MEASURE_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);

/// Gizmo group for map shapes, so their line width can be configured
/// without touching Bevy's default gizmos.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct MapGizmoGroup;

pub fn configure_map_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<MapGizmoGroup>();
    config.line.width = DEFAULT_STROKE_WEIGHT as f32;
}

/// Draws every shape the surface currently holds. Gizmo line width is per
/// group, not per shape; stroke weight is kept on the shape for persistence.
pub fn draw_shapes(mut gizmos: Gizmos<MapGizmoGroup>, shapes: Query<&SurfaceShape>) {
    for shape in shapes.iter() {
        match (&shape.kind, &shape.geometry) {
            (ShapeKind::HexCell, ShapeGeometry::Ring(ring)) => {
                let color = hex_to_color(&shape.style.stroke_color, 1.0);
                let mut outline: Vec<Vec2> = ring.iter().map(|v| geo_to_world(*v)).collect();
                if let Some(first) = outline.first().copied() {
                    outline.push(first);
                }
                gizmos.linestrip_2d(outline, color);
            }
            (ShapeKind::Polyline, ShapeGeometry::Path(points)) => {
                let color = hex_to_color(&shape.style.stroke_color, 1.0);
                for window in points.windows(2) {
                    gizmos.line_2d(geo_to_world(window[0]), geo_to_world(window[1]), color);
                }
            }
            (ShapeKind::MarkerPin, ShapeGeometry::Point(at)) => {
                let head = geo_to_world(*at) + Vec2::Y * MARKER_PIN_STEM;
                gizmos.circle_2d(
                    Isometry2d::from_translation(head),
                    MARKER_PIN_RADIUS,
                    MARKER_COLOR,
                );
                gizmos.line_2d(head - Vec2::Y * MARKER_PIN_RADIUS, geo_to_world(*at), MARKER_COLOR);
            }
            _ => {}
        }
    }
}

/// Draws transient geometry for the active mode: the unfinished freehand
/// stroke, and the measuring guide from the fixed start to the cursor.
pub fn draw_mode_preview(mut gizmos: Gizmos<MapGizmoGroup>, session: Res<AnnotationSession>) {
    match &session.mode {
        EditorMode::Drawing { stroke } if stroke.len() >= 2 => {
            let color = hex_to_color(&session.settings.stroke_color, 1.0);
            for window in stroke.windows(2) {
                gizmos.line_2d(geo_to_world(window[0]), geo_to_world(window[1]), color);
            }
        }
        EditorMode::Measuring { start: Some(start) } => {
            let from = geo_to_world(*start);
            gizmos.circle_2d(Isometry2d::from_translation(from), 4.0, MEASURE_COLOR);
            if let Some(cursor) = session.cursor {
                gizmos.line_2d(from, geo_to_world(cursor), MEASURE_COLOR);
            }
        }
        _ => {}
    }
}

/// Paints marker labels above their pins via an egui layer painter, keeping
/// text rendering out of the shape entities themselves.
pub fn draw_marker_labels(
    mut contexts: EguiContexts,
    shapes: Query<&SurfaceShape>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
) -> Result {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("marker_labels"),
    ));

    for shape in shapes.iter() {
        let (ShapeKind::MarkerPin, ShapeGeometry::Point(at), Some(label)) =
            (&shape.kind, &shape.geometry, &shape.style.label)
        else {
            continue;
        };
        let world = geo_to_world(*at) + Vec2::Y * (MARKER_PIN_STEM + MARKER_PIN_RADIUS);
        let Ok(viewport) = camera.world_to_viewport(camera_transform, world.extend(0.0)) else {
            continue;
        };
        painter.text(
            egui::pos2(viewport.x, viewport.y - 4.0),
            egui::Align2::CENTER_BOTTOM,
            label,
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
    }

    Ok(())
}
