//! Centralized constants used across the application.
//!
//! This module contains magic numbers and default configuration values that
//! are used in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Default H3 resolution for newly placed hexagons
pub const DEFAULT_RESOLUTION: u8 = 9;

/// Highest H3 resolution selectable in the UI
pub const MAX_RESOLUTION: u8 = 15;

/// Default stroke color for hexagons and drawn lines (hex RGB)
pub const DEFAULT_STROKE_COLOR: &str = "#0000ff";

/// Default fill opacity for hexagons
pub const DEFAULT_FILL_OPACITY: f32 = 0.3;

/// Default stroke weight for drawn lines, in pixels
pub const DEFAULT_STROKE_WEIGHT: u32 = 3;

/// Fill opacity applied to a hexagon while its list entry is hovered
pub const HOVER_FILL_OPACITY: f32 = 0.6;

/// Initial map view center (Berlin)
pub const MAP_CENTER_LAT: f64 = 52.5200;
pub const MAP_CENTER_LNG: f64 = 13.4050;

/// Scale of the equirectangular projection: world units per degree.
/// At 100k units/degree a resolution-9 hexagon (~0.002 degrees across)
/// spans roughly 200 world units.
pub const WORLD_UNITS_PER_DEGREE: f64 = 100_000.0;

/// Minimum cursor travel (world units) before a new stroke point is captured
pub const MIN_STROKE_STEP: f32 = 2.0;

/// How close (in kilometers) a right click must land to an existing marker
/// to delete it instead of opening the naming popup
pub const MARKER_HIT_RADIUS_KM: f64 = 0.05;
