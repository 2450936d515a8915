//! Encoding and decoding between the annotation store and the document
//! format.
//!
//! This is the single place where coordinate axis order flips: entities
//! carry (lat, lng), document geometry carries [lng, lat].

use bevy::prelude::*;
use serde_json::json;

use crate::geo::{self, LatLng};
use crate::session::{
    AnnotationSession, AnnotationStore, EditorMode, HexagonEntity, LineEntity, RenderSurface,
};

use super::format::{
    Feature, FeatureCollection, Geometry, LineProperties, PointProperties, PolygonProperties,
    COLLECTION_TYPE, DRAWN_LINE_TYPE,
};

/// The load input was not parseable structured data, or lacked the expected
/// feature-collection shape. The load is aborted and prior state kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDocumentError(pub String);

impl std::fmt::Display for MalformedDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed document: {}", self.0)
    }
}

impl std::error::Error for MalformedDocumentError {}

/// Store contents reconstructed from a document, ready to apply.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedDocument {
    pub hexagons: Vec<HexagonEntity>,
    /// (position, label) pairs; markers get fresh ids when applied
    pub markers: Vec<(LatLng, String)>,
    pub lines: Vec<LineEntity>,
    /// Features skipped for unrecognized geometry or broken properties
    pub skipped: usize,
}

/// Serialize the store to a feature collection.
pub fn encode(store: &AnnotationStore, timestamp: String) -> FeatureCollection {
    let mut features = Vec::new();

    for hexagon in store.hexagons() {
        let ring = match geo::boundary_of(&hexagon.cell_id) {
            Ok(ring) => ring,
            Err(e) => {
                // Cannot happen for a hexagon the store accepted
                warn!("Skipping hexagon on save: {}", e);
                continue;
            }
        };
        // GeoJSON rings repeat the first vertex at the end
        let mut coords: Vec<[f64; 2]> = ring.iter().map(|v| [v.lng, v.lat]).collect();
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
        features.push(Feature {
            kind: "Feature".to_string(),
            geometry: Geometry {
                kind: "Polygon".to_string(),
                coordinates: json!([coords]),
            },
            properties: json!({
                "h3Index": hexagon.cell_id,
                "color": hexagon.stroke_color,
                "fillColor": hexagon.stroke_color,
                "fillOpacity": hexagon.fill_opacity,
                "latitude": hexagon.anchor.lat,
                "longitude": hexagon.anchor.lng,
                "resolution": hexagon.resolution,
            }),
        });
    }

    for (index, line) in store.lines().iter().enumerate() {
        let coords: Vec<[f64; 2]> = line.points.iter().map(|p| [p.lng, p.lat]).collect();
        features.push(Feature {
            kind: "Feature".to_string(),
            geometry: Geometry {
                kind: "LineString".to_string(),
                coordinates: json!(coords),
            },
            properties: json!({
                "type": DRAWN_LINE_TYPE,
                "lineIndex": index,
                "color": line.stroke_color,
                "weight": line.weight,
            }),
        });
    }

    for marker in store.markers() {
        features.push(Feature {
            kind: "Feature".to_string(),
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: json!([marker.position.lng, marker.position.lat]),
            },
            properties: json!({
                "name": marker.label,
            }),
        });
    }

    FeatureCollection {
        kind: COLLECTION_TYPE.to_string(),
        timestamp,
        features,
    }
}

/// Parse a document. Fails only on structural problems; individual broken
/// or unrecognized features are skipped and counted.
pub fn decode(json: &str) -> Result<ParsedDocument, MalformedDocumentError> {
    let collection: FeatureCollection = serde_json::from_str(json)
        .map_err(|e| MalformedDocumentError(e.to_string()))?;
    if collection.kind != COLLECTION_TYPE {
        return Err(MalformedDocumentError(format!(
            "expected a {}, found '{}'",
            COLLECTION_TYPE, collection.kind
        )));
    }

    let mut document = ParsedDocument::default();
    for feature in &collection.features {
        let parsed = match feature.geometry.kind.as_str() {
            "Polygon" => parse_hexagon(feature)
                .map(|h| document.hexagons.push(h))
                .is_some(),
            "LineString" => parse_line(feature)
                .map(|l| document.lines.push(l))
                .is_some(),
            "Point" => parse_marker(feature)
                .map(|m| document.markers.push(m))
                .is_some(),
            other => {
                warn!("Skipping feature with unrecognized geometry '{}'", other);
                false
            }
        };
        if !parsed {
            document.skipped += 1;
        }
    }
    Ok(document)
}

fn parse_hexagon(feature: &Feature) -> Option<HexagonEntity> {
    let props: PolygonProperties =
        serde_json::from_value(feature.properties.clone()).ok()?;
    if !geo::is_valid_cell(&props.h3_index) {
        warn!("Skipping polygon with invalid cell index '{}'", props.h3_index);
        return None;
    }
    Some(HexagonEntity {
        cell_id: props.h3_index,
        anchor: LatLng::new(props.latitude, props.longitude),
        resolution: props.resolution,
        stroke_color: props.color,
        fill_opacity: props.fill_opacity,
    })
}

fn parse_line(feature: &Feature) -> Option<LineEntity> {
    let props: LineProperties = serde_json::from_value(feature.properties.clone()).ok()?;
    if props.kind != DRAWN_LINE_TYPE {
        warn!("Skipping line feature of kind '{}'", props.kind);
        return None;
    }
    let coords: Vec<[f64; 2]> =
        serde_json::from_value(feature.geometry.coordinates.clone()).ok()?;
    if coords.len() < 2 {
        return None;
    }
    Some(LineEntity {
        points: coords.iter().map(|c| LatLng::new(c[1], c[0])).collect(),
        stroke_color: props.color,
        weight: props.weight,
    })
}

fn parse_marker(feature: &Feature) -> Option<(LatLng, String)> {
    let props: PointProperties = serde_json::from_value(feature.properties.clone()).ok()?;
    if props.name.trim().is_empty() {
        return None;
    }
    let coords: [f64; 2] = serde_json::from_value(feature.geometry.coordinates.clone()).ok()?;
    Some((LatLng::new(coords[1], coords[0]), props.name))
}

/// Replace the session's contents with a parsed document: clear the store
/// and the command log, reset the interaction mode, then re-place every
/// entity.
pub fn apply(
    session: &mut AnnotationSession,
    surface: &mut dyn RenderSurface,
    document: ParsedDocument,
) {
    session.store.clear_all(surface);
    session.history.reset();
    session.mode = EditorMode::Idle;
    session.live_distance_km = None;

    for hexagon in document.hexagons {
        session.store.place_hexagon(surface, hexagon);
    }
    for (position, label) in document.markers {
        session.store.place_marker(surface, position, label);
    }
    for line in document.lines {
        session.store.append_line(surface, line);
    }
}
