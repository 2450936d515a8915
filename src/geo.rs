//! Geometry adapter wrapping the external hex-grid and distance libraries.
//!
//! This is the only module that touches `h3o` and `geo` types. Everywhere
//! else a hexagonal cell is just its opaque index string and a coordinate is
//! a [`LatLng`].

use std::str::FromStr;

use geo::HaversineDistance;
use h3o::{CellIndex, Resolution};

/// A geographic coordinate in degrees, latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Errors from the hex-grid library surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    /// Latitude/longitude outside the valid range
    InvalidCoordinate,
    /// Resolution outside the grid's supported range
    InvalidResolution(u8),
    /// A cell index string that the grid library does not recognize
    InvalidCellIndex(String),
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::InvalidCoordinate => write!(f, "coordinate out of range"),
            GeoError::InvalidResolution(r) => write!(f, "unsupported resolution {}", r),
            GeoError::InvalidCellIndex(s) => write!(f, "invalid cell index '{}'", s),
        }
    }
}

impl std::error::Error for GeoError {}

/// Resolve a coordinate to the index of the hexagonal cell containing it.
///
/// Pure and deterministic: the same (lat, lng, resolution) triple always
/// yields the same index, so two clicks inside one cell address one cell.
pub fn cell_at(at: LatLng, resolution: u8) -> Result<String, GeoError> {
    let res = Resolution::try_from(resolution)
        .map_err(|_| GeoError::InvalidResolution(resolution))?;
    // The grid library normalizes out-of-range angles instead of rejecting
    // them, so range-check here
    if !(-90.0..=90.0).contains(&at.lat) || !(-180.0..=180.0).contains(&at.lng) {
        return Err(GeoError::InvalidCoordinate);
    }
    let coord = h3o::LatLng::new(at.lat, at.lng).map_err(|_| GeoError::InvalidCoordinate)?;
    Ok(coord.to_cell(res).to_string())
}

/// The closed boundary ring of a cell, as (lat, lng) vertices.
///
/// The first vertex is not repeated at the end; renderers close the ring.
pub fn boundary_of(cell_id: &str) -> Result<Vec<LatLng>, GeoError> {
    let cell = CellIndex::from_str(cell_id)
        .map_err(|_| GeoError::InvalidCellIndex(cell_id.to_string()))?;
    Ok(cell
        .boundary()
        .iter()
        .map(|v| LatLng::new(v.lat(), v.lng()))
        .collect())
}

/// Whether a string is a cell index the grid library recognizes.
pub fn is_valid_cell(cell_id: &str) -> bool {
    CellIndex::from_str(cell_id).is_ok()
}

/// Great-circle (haversine) distance between two coordinates in kilometers.
pub fn great_circle_distance_km(a: LatLng, b: LatLng) -> f64 {
    let pa = geo::Point::new(a.lng, a.lat);
    let pb = geo::Point::new(b.lng, b.lat);
    pa.haversine_distance(&pb) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERLIN: LatLng = LatLng {
        lat: 52.5200,
        lng: 13.4050,
    };
    const PARIS: LatLng = LatLng {
        lat: 48.8566,
        lng: 2.3522,
    };

    #[test]
    fn test_cell_at_is_deterministic() {
        let a = cell_at(BERLIN, 9).unwrap();
        let b = cell_at(BERLIN, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nearby_points_share_a_cell() {
        // A couple of meters apart, well within one resolution-9 cell
        let a = cell_at(BERLIN, 9).unwrap();
        let b = cell_at(LatLng::new(52.52001, 13.40501), 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolution_changes_cell() {
        let coarse = cell_at(BERLIN, 5).unwrap();
        let fine = cell_at(BERLIN, 9).unwrap();
        assert_ne!(coarse, fine);
    }

    #[test]
    fn test_cell_at_rejects_bad_inputs() {
        assert_eq!(
            cell_at(LatLng::new(200.0, 13.0), 9),
            Err(GeoError::InvalidCoordinate)
        );
        assert_eq!(cell_at(BERLIN, 42), Err(GeoError::InvalidResolution(42)));
    }

    #[test]
    fn test_boundary_is_a_hexagon_ring() {
        let cell = cell_at(BERLIN, 9).unwrap();
        let ring = boundary_of(&cell).unwrap();
        // Hexagons have six vertices (pentagon cells have five, but not here)
        assert_eq!(ring.len(), 6);
        // All vertices sit near the anchor coordinate
        for v in &ring {
            assert!((v.lat - BERLIN.lat).abs() < 0.01);
            assert!((v.lng - BERLIN.lng).abs() < 0.01);
        }
    }

    #[test]
    fn test_boundary_of_rejects_garbage() {
        assert!(matches!(
            boundary_of("not-a-cell"),
            Err(GeoError::InvalidCellIndex(_))
        ));
        assert!(!is_valid_cell("not-a-cell"));
    }

    #[test]
    fn test_distance_properties() {
        assert_eq!(great_circle_distance_km(BERLIN, BERLIN), 0.0);
        let d1 = great_circle_distance_km(BERLIN, PARIS);
        let d2 = great_circle_distance_km(PARIS, BERLIN);
        assert!((d1 - d2).abs() < 1e-9);
        // Berlin to Paris is about 878 km
        assert!(d1 > 850.0 && d1 < 900.0, "got {}", d1);
    }
}
