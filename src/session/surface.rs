//! The narrow drawing interface between the annotation core and whatever
//! actually renders shapes on screen.
//!
//! The store drives this trait on every mutation, so rendered state can never
//! drift from collection state. The production implementation lives in
//! [`crate::render`]; tests use [`RecordingSurface`].

use crate::geo::LatLng;

/// Opaque handle to a shape the surface is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub u64);

/// What category of shape a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    HexCell,
    MarkerPin,
    Polyline,
}

/// Geographic geometry of a shape, in (lat, lng) order.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// Closed polygon ring (first vertex not repeated)
    Ring(Vec<LatLng>),
    /// Open polyline
    Path(Vec<LatLng>),
    /// Single point
    Point(LatLng),
}

/// Styling for a shape. Fields irrelevant to a given kind are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke_color: String,
    pub fill_opacity: f32,
    pub weight: u32,
    pub label: Option<String>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: crate::constants::DEFAULT_STROKE_COLOR.to_string(),
            fill_opacity: 0.0,
            weight: 1,
            label: None,
        }
    }
}

/// Rendering surface consumed by the annotation store.
pub trait RenderSurface {
    fn add_shape(
        &mut self,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        style: ShapeStyle,
    ) -> ShapeHandle;

    fn remove_shape(&mut self, handle: ShapeHandle);

    fn restyle_shape(&mut self, handle: ShapeHandle, style: ShapeStyle);
}

/// In-memory surface for unit tests: records what is currently displayed.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSurface {
    next: u64,
    pub live: std::collections::HashMap<ShapeHandle, (ShapeKind, ShapeGeometry, ShapeStyle)>,
    pub restyles: Vec<(ShapeHandle, ShapeStyle)>,
}

#[cfg(test)]
impl RenderSurface for RecordingSurface {
    fn add_shape(
        &mut self,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        style: ShapeStyle,
    ) -> ShapeHandle {
        self.next += 1;
        let handle = ShapeHandle(self.next);
        self.live.insert(handle, (kind, geometry, style));
        handle
    }

    fn remove_shape(&mut self, handle: ShapeHandle) {
        self.live.remove(&handle);
    }

    fn restyle_shape(&mut self, handle: ShapeHandle, style: ShapeStyle) {
        if let Some(entry) = self.live.get_mut(&handle) {
            entry.2 = style.clone();
        }
        self.restyles.push((handle, style));
    }
}

#[cfg(test)]
impl RecordingSurface {
    /// Number of shapes of the given kind currently displayed.
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.live.values().filter(|(k, _, _)| *k == kind).count()
    }
}
