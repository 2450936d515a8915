//! Serde types for the persisted document: a GeoJSON-style feature
//! collection with per-kind property bags.
//!
//! Geometry is kept structurally loose (`kind` string + raw coordinates) so
//! a document containing geometry kinds we do not recognize still parses;
//! the codec skips those features instead of failing the whole load.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_RESOLUTION;

pub const COLLECTION_TYPE: &str = "FeatureCollection";
pub const DRAWN_LINE_TYPE: &str = "drawnLine";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO-8601 generation timestamp; older documents may lack it
    #[serde(default)]
    pub timestamp: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Value,
}

fn feature_kind() -> String {
    "Feature".to_string()
}

/// Coordinates are `[lng, lat]` pairs (GeoJSON axis order): a `[ring]` for
/// polygons, a pair list for line strings, a single pair for points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// Properties of a hexagon feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonProperties {
    pub h3_index: String,
    pub color: String,
    #[allow(dead_code)]
    pub fill_color: String,
    pub fill_opacity: f32,
    pub latitude: f64,
    pub longitude: f64,
    /// Older documents predate this field; fall back to the default grid
    /// resolution for them
    #[serde(default = "default_resolution")]
    pub resolution: u8,
}

fn default_resolution() -> u8 {
    DEFAULT_RESOLUTION
}

/// Properties of a drawn-line feature. `kind` discriminates drawn lines
/// from future line-shaped geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProperties {
    #[serde(rename = "type")]
    pub kind: String,
    #[allow(dead_code)]
    pub line_index: usize,
    pub color: String,
    pub weight: u32,
}

/// Properties of a marker feature.
#[derive(Debug, Clone, Deserialize)]
pub struct PointProperties {
    pub name: String,
}
