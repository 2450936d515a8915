//! The annotation session: every piece of mutable annotation state in one
//! place, owned by a single resource instead of scattered globals.
//!
//! ## Module Structure
//!
//! - [`entities`] - HexagonEntity, MarkerEntity, LineEntity, StyleSettings
//! - [`store`] - AnnotationStore collections + rendering side effects
//! - [`surface`] - RenderSurface trait the store draws through

mod entities;
mod store;
mod surface;


pub use entities::{HexagonEntity, LineEntity, MarkerEntity, StyleSettings};
pub use store::AnnotationStore;
pub use surface::{RenderSurface, ShapeGeometry, ShapeHandle, ShapeKind, ShapeStyle};

#[cfg(test)]
pub(crate) use surface::RecordingSurface;

use bevy::prelude::*;

use crate::geo::LatLng;
use crate::history::CommandHistory;

/// The active interaction mode, as one value with exhaustive transitions.
///
/// Drawing and measuring are mutually exclusive; entering one leaves the
/// other. In-progress sub-state (pending marker coordinate, stroke buffer,
/// measuring start point) lives inside the variant so that leaving a mode
/// cannot strand it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// Marker popup open, awaiting name confirmation
    PlacingMarker { at: LatLng },
    /// Freehand drawing armed; `stroke` is non-empty while a stroke is live
    Drawing { stroke: Vec<LatLng> },
    /// Distance tool armed; `start` set after the first click
    Measuring { start: Option<LatLng> },
}

impl EditorMode {
    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorMode::Drawing { .. })
    }

    pub fn is_measuring(&self) -> bool {
        matches!(self, EditorMode::Measuring { .. })
    }
}

/// All mutable annotation state: collections, command log, interaction mode,
/// current styling inputs, and the live measuring readout.
#[derive(Resource, Default)]
pub struct AnnotationSession {
    pub store: AnnotationStore,
    pub history: CommandHistory,
    pub mode: EditorMode,
    pub settings: StyleSettings,
    /// Live distance readout while measuring, in kilometers
    pub live_distance_km: Option<f64>,
    /// Last known cursor coordinate, for the status readout
    pub cursor: Option<LatLng>,
}
