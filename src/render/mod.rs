//! The production rendering surface: projects geographic shapes into the 2D
//! world and keeps Bevy entities in sync with what the store placed.
//!
//! The store runs on the [`MapSurface`] resource, which queues operations;
//! [`apply_surface_ops`] drains the queue each frame, spawning/despawning
//! shape entities that the gizmo systems in [`draw`] render.
//!
//! ## Module Structure
//!
//! - [`MapSurface`] - queue-backed `RenderSurface` implementation
//! - [`draw`] - gizmo rendering of shapes, previews, and marker labels

mod draw;

use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::common::hex_to_color;
use crate::constants::{MAP_CENTER_LAT, MAP_CENTER_LNG, WORLD_UNITS_PER_DEGREE};
use crate::geo::LatLng;
use crate::session::{RenderSurface, ShapeGeometry, ShapeHandle, ShapeKind, ShapeStyle};

/// Project a geographic coordinate into world space. Equirectangular,
/// centered on the map center so nearby coordinates keep f32 precision.
pub fn geo_to_world(at: LatLng) -> Vec2 {
    Vec2::new(
        ((at.lng - MAP_CENTER_LNG) * WORLD_UNITS_PER_DEGREE) as f32,
        ((at.lat - MAP_CENTER_LAT) * WORLD_UNITS_PER_DEGREE) as f32,
    )
}

/// Inverse of [`geo_to_world`], used to turn cursor positions into
/// geographic input events.
pub fn world_to_geo(pos: Vec2) -> LatLng {
    LatLng::new(
        MAP_CENTER_LAT + pos.y as f64 / WORLD_UNITS_PER_DEGREE,
        MAP_CENTER_LNG + pos.x as f64 / WORLD_UNITS_PER_DEGREE,
    )
}

/// One queued drawing operation.
enum SurfaceOp {
    Add {
        handle: ShapeHandle,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        style: ShapeStyle,
    },
    Remove {
        handle: ShapeHandle,
    },
    Restyle {
        handle: ShapeHandle,
        style: ShapeStyle,
    },
}

/// Queue-backed render surface. Handles are allocated immediately; the
/// entity work happens when the sync system drains the queue, still within
/// the same frame.
#[derive(Resource, Default)]
pub struct MapSurface {
    next_handle: u64,
    pending: Vec<SurfaceOp>,
}

impl RenderSurface for MapSurface {
    fn add_shape(
        &mut self,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        style: ShapeStyle,
    ) -> ShapeHandle {
        self.next_handle += 1;
        let handle = ShapeHandle(self.next_handle);
        self.pending.push(SurfaceOp::Add {
            handle,
            kind,
            geometry,
            style,
        });
        handle
    }

    fn remove_shape(&mut self, handle: ShapeHandle) {
        self.pending.push(SurfaceOp::Remove { handle });
    }

    fn restyle_shape(&mut self, handle: ShapeHandle, style: ShapeStyle) {
        self.pending.push(SurfaceOp::Restyle { handle, style });
    }
}

/// A shape the surface is currently displaying.
#[derive(Component)]
pub struct SurfaceShape {
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
    pub style: ShapeStyle,
}

/// Material of a hexagon's fill mesh, kept for restyling.
#[derive(Component)]
struct FillMaterial(Handle<ColorMaterial>);

/// Maps live handles to their entities.
#[derive(Resource, Default)]
struct SurfaceIndex {
    entities: HashMap<ShapeHandle, Entity>,
}

/// Folds same-batch restyles into their pending `Add`: an entity spawned
/// through `Commands` is not queryable until the next frame, so a restyle
/// queued in the same frame as the add must land on the add itself.
fn merge_batch(ops: Vec<SurfaceOp>) -> Vec<SurfaceOp> {
    let mut batch: Vec<SurfaceOp> = Vec::with_capacity(ops.len());
    for op in ops {
        let SurfaceOp::Restyle { handle, style } = op else {
            batch.push(op);
            continue;
        };
        let pending_add = batch.iter_mut().find_map(|queued| match queued {
            SurfaceOp::Add {
                handle: h, style, ..
            } if *h == handle => Some(style),
            _ => None,
        });
        match pending_add {
            Some(add_style) => *add_style = style,
            None => batch.push(SurfaceOp::Restyle { handle, style }),
        }
    }
    batch
}

/// Drains the surface queue, mutating the entity world to match.
fn apply_surface_ops(
    mut commands: Commands,
    mut surface: ResMut<MapSurface>,
    mut index: ResMut<SurfaceIndex>,
    mut shapes: Query<(&mut SurfaceShape, Option<&FillMaterial>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for op in merge_batch(surface.pending.drain(..).collect()) {
        match op {
            SurfaceOp::Add {
                handle,
                kind,
                geometry,
                style,
            } => {
                let entity = spawn_shape(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    kind,
                    geometry,
                    style,
                );
                index.entities.insert(handle, entity);
            }
            SurfaceOp::Remove { handle } => {
                if let Some(entity) = index.entities.remove(&handle) {
                    commands.entity(entity).despawn();
                }
            }
            SurfaceOp::Restyle { handle, style } => {
                let Some(&entity) = index.entities.get(&handle) else {
                    continue;
                };
                if let Ok((mut shape, fill)) = shapes.get_mut(entity) {
                    if let Some(FillMaterial(material)) = fill
                        && let Some(material) = materials.get_mut(material)
                    {
                        material.color = hex_to_color(&style.stroke_color, style.fill_opacity);
                    }
                    shape.style = style;
                }
            }
        }
    }
}

fn spawn_shape(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    kind: ShapeKind,
    geometry: ShapeGeometry,
    style: ShapeStyle,
) -> Entity {
    // Hexagons get a filled mesh honoring fillOpacity; everything else is
    // drawn purely with gizmos from the shape component
    if kind == ShapeKind::HexCell
        && let ShapeGeometry::Ring(ring) = &geometry
        && ring.len() >= 3
    {
        let world: Vec<Vec2> = ring.iter().map(|v| geo_to_world(*v)).collect();
        let material = materials.add(ColorMaterial::from_color(hex_to_color(
            &style.stroke_color,
            style.fill_opacity,
        )));
        return commands
            .spawn((
                Mesh2d(meshes.add(ring_fill_mesh(&world))),
                MeshMaterial2d(material.clone()),
                Transform::from_translation(Vec3::new(0.0, 0.0, 1.0)),
                SurfaceShape {
                    kind,
                    geometry,
                    style,
                },
                FillMaterial(material),
            ))
            .id();
    }

    commands
        .spawn(SurfaceShape {
            kind,
            geometry,
            style,
        })
        .id()
}

/// Triangle-fan fill for a convex ring (hexagon cells are always convex).
fn ring_fill_mesh(world: &[Vec2]) -> Mesh {
    let vertices: Vec<[f32; 3]> = world.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let mut indices = Vec::new();
    for i in 1..(world.len() as u32 - 1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapSurface>()
            .init_resource::<SurfaceIndex>()
            .init_gizmo_group::<draw::MapGizmoGroup>()
            .add_systems(Startup, draw::configure_map_gizmos)
            .add_systems(
                Update,
                (apply_surface_ops, draw::draw_shapes, draw::draw_mode_preview),
            )
            .add_systems(EguiPrimaryContextPass, draw::draw_marker_labels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_round_trip() {
        let berlin = LatLng::new(52.5200, 13.4050);
        let there_and_back = world_to_geo(geo_to_world(berlin));
        assert!((there_and_back.lat - berlin.lat).abs() < 1e-4);
        assert!((there_and_back.lng - berlin.lng).abs() < 1e-4);
    }

    #[test]
    fn test_map_center_projects_to_origin() {
        let center = LatLng::new(MAP_CENTER_LAT, MAP_CENTER_LNG);
        assert_eq!(geo_to_world(center), Vec2::ZERO);
    }

    #[test]
    fn test_surface_allocates_distinct_handles() {
        let mut surface = MapSurface::default();
        let a = surface.add_shape(
            ShapeKind::MarkerPin,
            ShapeGeometry::Point(LatLng::new(0.0, 0.0)),
            ShapeStyle::default(),
        );
        let b = surface.add_shape(
            ShapeKind::MarkerPin,
            ShapeGeometry::Point(LatLng::new(1.0, 1.0)),
            ShapeStyle::default(),
        );
        assert_ne!(a, b);
        assert_eq!(surface.pending.len(), 2);
    }

    #[test]
    fn test_same_frame_restyle_lands_on_pending_add() {
        let mut surface = MapSurface::default();
        let handle = surface.add_shape(
            ShapeKind::HexCell,
            ShapeGeometry::Ring(vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.001, 0.0),
                LatLng::new(0.0, 0.001),
            ]),
            ShapeStyle::default(),
        );
        surface.restyle_shape(
            handle,
            ShapeStyle {
                fill_opacity: 0.9,
                ..Default::default()
            },
        );

        let batch = merge_batch(surface.pending.drain(..).collect());
        assert_eq!(batch.len(), 1);
        assert!(matches!(
            &batch[0],
            SurfaceOp::Add { style, .. } if style.fill_opacity == 0.9
        ));
    }

    #[test]
    fn test_restyle_of_settled_shape_passes_through() {
        let mut surface = MapSurface::default();
        let handle = surface.add_shape(
            ShapeKind::MarkerPin,
            ShapeGeometry::Point(LatLng::new(0.0, 0.0)),
            ShapeStyle::default(),
        );
        // The add was applied on an earlier frame
        surface.pending.clear();

        surface.restyle_shape(handle, ShapeStyle::default());
        let batch = merge_batch(surface.pending.drain(..).collect());
        assert_eq!(batch.len(), 1);
        assert!(matches!(&batch[0], SurfaceOp::Restyle { .. }));
    }

    #[test]
    fn test_ring_fill_mesh_triangulates_hexagon() {
        let ring: Vec<Vec2> = (0..6)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / 6.0;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();
        let mesh = ring_fill_mesh(&ring);
        // A fan over six vertices yields four triangles
        assert_eq!(mesh.indices().map(|i| i.len()), Some(12));
    }
}
