//! GeoJSON-style wire format for boundaries and zones
//!
//! Boundaries arrive as a Feature or a FeatureCollection whose geometries are
//! Polygon or MultiPolygon; zones leave as a FeatureCollection with
//! `properties.label` set. Coordinates are `[longitude, latitude]`.
//!
//! Parsing is lenient past the JSON layer: features without geometry or with
//! an unsupported geometry type are skipped rather than rejected.
//!
//! This module is only available with the `serde` feature.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Boundary, Geometry, Polygon, Ring};
use crate::zone::Zone;

/// A `[longitude, latitude]` position
pub type Position = [f64; 2];

/// Geometry member of a Feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryObject {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    /// Any other GeoJSON geometry type; ignored by the engine
    #[serde(other)]
    Unsupported,
}

/// Feature properties the engine reads or writes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

/// A single Feature; the `type` member is optional on input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: FeatureTag,
    pub geometry: Option<GeometryObject>,
    #[serde(default)]
    pub properties: Properties,
}

/// A list of Features
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionTag,
    pub features: Vec<Feature>,
}

/// A boundary as delivered by a geocoding service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundaryDocument {
    Collection(FeatureCollection),
    Feature(Feature),
}

fn to_ring(positions: &[Position]) -> Ring {
    positions.iter().map(|&[lng, lat]| DVec2::new(lng, lat)).collect()
}

fn to_positions(ring: &[DVec2]) -> Vec<Position> {
    ring.iter().map(|c| [c.x, c.y]).collect()
}

fn to_polygon(rings: &[Vec<Position>]) -> Polygon {
    match rings.split_first() {
        Some((exterior, holes)) => {
            Polygon::with_holes(to_ring(exterior), holes.iter().map(|h| to_ring(h)).collect())
        }
        None => Polygon::default(),
    }
}

impl GeometryObject {
    /// Engine geometry, `None` for unsupported types
    pub fn to_geometry(&self) -> Option<Geometry> {
        match self {
            GeometryObject::Polygon { coordinates } => {
                Some(Geometry::Polygon(to_polygon(coordinates)))
            }
            GeometryObject::MultiPolygon { coordinates } => Some(Geometry::MultiPolygon(
                coordinates.iter().map(|p| to_polygon(p)).collect(),
            )),
            GeometryObject::Unsupported => None,
        }
    }
}

impl From<&Geometry> for GeometryObject {
    fn from(geometry: &Geometry) -> Self {
        let polygon_coordinates = |p: &Polygon| -> Vec<Vec<Position>> {
            std::iter::once(&p.exterior)
                .chain(&p.holes)
                .map(|r| to_positions(r))
                .collect()
        };
        match geometry {
            Geometry::Polygon(p) => GeometryObject::Polygon {
                coordinates: polygon_coordinates(p),
            },
            Geometry::MultiPolygon(ps) => GeometryObject::MultiPolygon {
                coordinates: ps.iter().map(polygon_coordinates).collect(),
            },
        }
    }
}

impl From<BoundaryDocument> for Boundary {
    fn from(document: BoundaryDocument) -> Self {
        match document {
            BoundaryDocument::Feature(feature) => {
                match feature.geometry.as_ref().and_then(GeometryObject::to_geometry) {
                    Some(geometry) => Boundary::Single(geometry),
                    None => Boundary::Collection(Vec::new()),
                }
            }
            BoundaryDocument::Collection(collection) => Boundary::Collection(
                collection
                    .features
                    .iter()
                    .filter_map(|f| f.geometry.as_ref().and_then(GeometryObject::to_geometry))
                    .collect(),
            ),
        }
    }
}

impl From<&Zone> for Feature {
    fn from(zone: &Zone) -> Self {
        let coordinates = std::iter::once(&zone.exterior)
            .chain(&zone.holes)
            .map(|r| to_positions(r))
            .collect();

        Feature {
            kind: FeatureTag::Feature,
            geometry: Some(GeometryObject::Polygon { coordinates }),
            properties: Properties {
                label: Some(zone.label.clone()),
            },
        }
    }
}

/// Parse a Feature or FeatureCollection JSON document into a boundary
///
/// # Errors
///
/// Returns `Serialization` when the text is not a Feature/FeatureCollection
/// document. Unsupported or missing geometries are skipped, not reported.
pub fn parse_boundary(json: &str) -> Result<Boundary> {
    let document: BoundaryDocument = serde_json::from_str(json)?;
    Ok(document.into())
}

/// Wrap zones in a FeatureCollection, one Feature per zone
pub fn zones_to_feature_collection(zones: &[Zone]) -> FeatureCollection {
    FeatureCollection {
        kind: FeatureCollectionTag::FeatureCollection,
        features: zones.iter().map(Feature::from).collect(),
    }
}

/// Serialize zones as a FeatureCollection JSON string
pub fn zones_to_geojson(zones: &[Zone]) -> Result<String> {
    Ok(serde_json::to_string(&zones_to_feature_collection(zones))?)
}
