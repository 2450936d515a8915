//! The three annotation entity types owned by the store.

use crate::constants::{
    DEFAULT_FILL_OPACITY, DEFAULT_RESOLUTION, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WEIGHT,
};
use crate::geo::LatLng;

/// A placed hexagonal grid cell.
///
/// Keyed by `cell_id`; at most one live hexagon per cell at any time. The
/// anchor is the click coordinate that resolved to the cell, kept so the
/// document round-trips the exact placement.
#[derive(Debug, Clone, PartialEq)]
pub struct HexagonEntity {
    pub cell_id: String,
    pub anchor: LatLng,
    pub resolution: u8,
    pub stroke_color: String,
    pub fill_opacity: f32,
}

/// A named point marker.
///
/// The id comes from the store's own monotone counter and stays stable
/// across undo/redo. It is never persisted; loaded markers get fresh ids.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntity {
    pub id: u64,
    pub position: LatLng,
    pub label: String,
}

/// A finished freehand stroke. Immutable once appended; identity is
/// positional (membership in the store's ordered line list).
#[derive(Debug, Clone, PartialEq)]
pub struct LineEntity {
    pub points: Vec<LatLng>,
    pub stroke_color: String,
    pub weight: u32,
}

/// Current styling inputs from the UI chrome, applied to new placements.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSettings {
    pub resolution: u8,
    pub stroke_color: String,
    pub fill_opacity: f32,
    pub stroke_weight: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            fill_opacity: DEFAULT_FILL_OPACITY,
            stroke_weight: DEFAULT_STROKE_WEIGHT,
        }
    }
}
