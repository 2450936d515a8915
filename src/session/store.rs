//! The annotation store: the three collections of live entities and their
//! rendering side effects.
//!
//! Every mutation goes through the [`RenderSurface`] passed by the caller,
//! keeping displayed shapes and collection entries in lockstep. All removal
//! paths are no-ops on missing entities so command replay stays safe across
//! undo/redo and document-load boundaries.

use std::collections::{BTreeMap, HashMap};

use bevy::prelude::*;

use crate::geo;

use super::entities::{HexagonEntity, LineEntity, MarkerEntity};
use super::surface::{RenderSurface, ShapeGeometry, ShapeHandle, ShapeKind, ShapeStyle};

#[derive(Default)]
pub struct AnnotationStore {
    // BTreeMaps give deterministic iteration for the document codec and UI list
    hexagons: BTreeMap<String, HexagonEntity>,
    hexagon_handles: HashMap<String, ShapeHandle>,
    markers: BTreeMap<u64, MarkerEntity>,
    marker_handles: HashMap<u64, ShapeHandle>,
    lines: Vec<LineEntity>,
    line_handles: Vec<ShapeHandle>,
    next_marker_id: u64,
}

impl AnnotationStore {
    /// Insert and render a hexagon. Silently a no-op when the cell is
    /// already occupied (the controller decides add-vs-toggle before
    /// calling) or when the cell id is not resolvable to a boundary.
    ///
    /// Returns whether the hexagon was inserted.
    pub fn place_hexagon(
        &mut self,
        surface: &mut dyn RenderSurface,
        hexagon: HexagonEntity,
    ) -> bool {
        if self.hexagons.contains_key(&hexagon.cell_id) {
            return false;
        }
        let ring = match geo::boundary_of(&hexagon.cell_id) {
            Ok(ring) => ring,
            Err(e) => {
                warn!("Refusing hexagon without a boundary: {}", e);
                return false;
            }
        };
        let handle = surface.add_shape(
            ShapeKind::HexCell,
            ShapeGeometry::Ring(ring),
            ShapeStyle {
                stroke_color: hexagon.stroke_color.clone(),
                fill_opacity: hexagon.fill_opacity,
                ..Default::default()
            },
        );
        self.hexagon_handles.insert(hexagon.cell_id.clone(), handle);
        self.hexagons.insert(hexagon.cell_id.clone(), hexagon);
        true
    }

    /// Remove and un-render the hexagon on the given cell, returning it.
    /// No-op (`None`) when the cell is empty.
    pub fn remove_hexagon(
        &mut self,
        surface: &mut dyn RenderSurface,
        cell_id: &str,
    ) -> Option<HexagonEntity> {
        let hexagon = self.hexagons.remove(cell_id)?;
        if let Some(handle) = self.hexagon_handles.remove(cell_id) {
            surface.remove_shape(handle);
        }
        Some(hexagon)
    }

    pub fn contains_hexagon(&self, cell_id: &str) -> bool {
        self.hexagons.contains_key(cell_id)
    }

    pub fn hexagon(&self, cell_id: &str) -> Option<&HexagonEntity> {
        self.hexagons.get(cell_id)
    }

    /// The surface handle currently rendering a hexagon, for restyling.
    pub fn hexagon_handle(&self, cell_id: &str) -> Option<ShapeHandle> {
        self.hexagon_handles.get(cell_id).copied()
    }

    pub fn hexagons(&self) -> impl Iterator<Item = &HexagonEntity> {
        self.hexagons.values()
    }

    pub fn hexagon_count(&self) -> usize {
        self.hexagons.len()
    }

    /// Create, insert, and render a new marker, allocating its id.
    /// Returns a clone of the stored entity for command recording.
    pub fn place_marker(
        &mut self,
        surface: &mut dyn RenderSurface,
        position: crate::geo::LatLng,
        label: String,
    ) -> MarkerEntity {
        self.next_marker_id += 1;
        let marker = MarkerEntity {
            id: self.next_marker_id,
            position,
            label,
        };
        self.insert_marker(surface, marker.clone());
        marker
    }

    /// Re-insert a marker under its existing id (undo/redo replay path).
    /// No-op when the id is already live.
    pub fn restore_marker(&mut self, surface: &mut dyn RenderSurface, marker: MarkerEntity) {
        if self.markers.contains_key(&marker.id) {
            return;
        }
        // Keep the counter ahead of every id ever seen
        self.next_marker_id = self.next_marker_id.max(marker.id);
        self.insert_marker(surface, marker);
    }

    fn insert_marker(&mut self, surface: &mut dyn RenderSurface, marker: MarkerEntity) {
        let handle = surface.add_shape(
            ShapeKind::MarkerPin,
            ShapeGeometry::Point(marker.position),
            ShapeStyle {
                label: Some(marker.label.clone()),
                ..Default::default()
            },
        );
        self.marker_handles.insert(marker.id, handle);
        self.markers.insert(marker.id, marker);
    }

    /// Remove and un-render a marker by id; no-op (`None`) when absent.
    pub fn remove_marker(
        &mut self,
        surface: &mut dyn RenderSurface,
        id: u64,
    ) -> Option<MarkerEntity> {
        let marker = self.markers.remove(&id)?;
        if let Some(handle) = self.marker_handles.remove(&id) {
            surface.remove_shape(handle);
        }
        Some(marker)
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerEntity> {
        self.markers.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Append and render a finished line. Lines are immutable once added.
    pub fn append_line(&mut self, surface: &mut dyn RenderSurface, line: LineEntity) {
        let handle = surface.add_shape(
            ShapeKind::Polyline,
            ShapeGeometry::Path(line.points.clone()),
            ShapeStyle {
                stroke_color: line.stroke_color.clone(),
                weight: line.weight,
                ..Default::default()
            },
        );
        self.line_handles.push(handle);
        self.lines.push(line);
    }

    /// Pop and un-render the most recently appended line; no-op when empty.
    pub fn remove_last_line(&mut self, surface: &mut dyn RenderSurface) -> Option<LineEntity> {
        let line = self.lines.pop()?;
        if let Some(handle) = self.line_handles.pop() {
            surface.remove_shape(handle);
        }
        Some(line)
    }

    pub fn lines(&self) -> &[LineEntity] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Empty all three collections and un-render every entity.
    /// Used only by document load and "new document".
    pub fn clear_all(&mut self, surface: &mut dyn RenderSurface) {
        for handle in self.hexagon_handles.values() {
            surface.remove_shape(*handle);
        }
        for handle in self.marker_handles.values() {
            surface.remove_shape(*handle);
        }
        for handle in self.line_handles.drain(..) {
            surface.remove_shape(handle);
        }
        self.hexagons.clear();
        self.hexagon_handles.clear();
        self.markers.clear();
        self.marker_handles.clear();
        self.lines.clear();
        // next_marker_id keeps counting: ids stay unique for the whole session
    }

    pub fn is_empty(&self) -> bool {
        self.hexagons.is_empty() && self.markers.is_empty() && self.lines.is_empty()
    }
}
