//! GeoJSON file reading and mapping onto the feature tree.

use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::bounds::Bounds;
use crate::coordinate::Coordinate;
use crate::error::{GeoError, Result};
use crate::feature::Feature;
use crate::view::{self, WalkOptions};

/// Reader for GeoJSON files.
///
/// Feature collections become containers, features become placemarks and
/// geometries keep their structure. Positions are `[lng, lat, alt?]` in WGS84.
#[derive(Debug)]
pub struct GeojsonReader {
    root: Feature,
}

impl GeojsonReader {
    /// Opens and parses a GeoJSON file.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GeoError::FileNotFound(path.display().to_string())
            } else {
                GeoError::Io(e)
            }
        })?;

        content.parse()
    }

    /// Root of the mapped feature tree.
    pub fn root(&self) -> &Feature {
        &self.root
    }

    pub fn into_root(self) -> Feature {
        self.root
    }

    /// Computes the bounds of the whole document.
    pub fn compute_bounds(&self, options: WalkOptions) -> Bounds {
        view::compute_bounds(&&self.root, options)
    }
}

impl FromStr for GeojsonReader {
    type Err = GeoError;

    fn from_str(content: &str) -> Result<Self> {
        let geojson: GeoJson = content
            .parse()
            .map_err(|e| GeoError::GeojsonParse(format!("{}", e)))?;

        let root = feature_tree(&geojson);
        if !has_position(&root) {
            return Err(GeoError::EmptyGeojson);
        }

        Ok(Self { root })
    }
}

/// Map a GeoJSON document onto the feature tree.
fn feature_tree(geojson: &GeoJson) -> Feature {
    match geojson {
        GeoJson::Geometry(geom) => geometry_node(geom),
        GeoJson::Feature(feature) => feature_node(feature),
        GeoJson::FeatureCollection(collection) => {
            Feature::Container(collection.features.iter().map(feature_node).collect())
        }
    }
}

fn feature_node(feature: &geojson::Feature) -> Feature {
    Feature::Placemark(feature.geometry.iter().map(geometry_node).collect())
}

/// Convert a GeoJSON geometry into a tree node.
fn geometry_node(geom: &Geometry) -> Feature {
    match &geom.value {
        Value::Point(pos) => position(pos).map_or(Feature::Other, Feature::Point),
        Value::MultiPoint(points) => Feature::GeometryCollection(
            points
                .iter()
                .filter_map(|p| position(p))
                .map(Feature::Point)
                .collect(),
        ),
        Value::LineString(coords) => line(coords),
        Value::MultiLineString(lines) => {
            Feature::GeometryCollection(lines.iter().map(|l| line(l)).collect())
        }
        Value::Polygon(rings) => polygon(rings),
        Value::MultiPolygon(polygons) => {
            Feature::GeometryCollection(polygons.iter().map(|p| polygon(p)).collect())
        }
        Value::GeometryCollection(geometries) => {
            Feature::GeometryCollection(geometries.iter().map(geometry_node).collect())
        }
    }
}

/// True when any node of the tree carries at least one position.
fn has_position(node: &Feature) -> bool {
    match node {
        Feature::Point(_) | Feature::GroundOverlay(_) => true,
        Feature::Line(coords) => !coords.is_empty(),
        Feature::Container(children)
        | Feature::Placemark(children)
        | Feature::GeometryCollection(children) => children.iter().any(has_position),
        Feature::Other => false,
    }
}

/// A polygon is a collection of its rings.
fn polygon(rings: &[Vec<Vec<f64>>]) -> Feature {
    Feature::GeometryCollection(rings.iter().map(|ring| line(ring)).collect())
}

fn line(coords: &[Vec<f64>]) -> Feature {
    Feature::Line(coords.iter().filter_map(|p| position(p)).collect())
}

/// Convert a GeoJSON position to a coordinate, skipping malformed ones.
fn position(pos: &[f64]) -> Option<Coordinate> {
    match pos {
        [lng, lat] => Some(Coordinate::from_lat_lng(*lat, *lng)),
        [lng, lat, alt, ..] => Some(Coordinate::new(*lat, *lng, *alt, Default::default())),
        _ => None,
    }
}
