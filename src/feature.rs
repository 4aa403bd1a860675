//! Feature tree vocabulary.
//!
//! A tree source (a KML DOM, a GeoJSON document, a plug-in bridge) describes
//! each of its nodes with a [`NodeKind`] through the [`FeatureNode`] trait.
//! The bounds walk in [`crate::view`] only ever sees this closed set of shapes.

use crate::coordinate::Coordinate;
use crate::error::Result;

/// Geographic box of a ground overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    /// Altitude of the overlay in metres.
    pub altitude: f64,
}

impl LatLonBox {
    /// The four corners at the overlay altitude: NE, NW, SE, SW.
    pub fn corners(&self) -> [Coordinate; 4] {
        let at = |lat, lng| Coordinate::new(lat, lng, self.altitude, Default::default());
        [
            at(self.north, self.east),
            at(self.north, self.west),
            at(self.south, self.east),
            at(self.south, self.west),
        ]
    }
}

/// What a node is, as far as bounds computation is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Document, folder or layer. Children are features.
    Container,
    /// Image draped over a lat/lon box.
    GroundOverlay(LatLonBox),
    /// Point, bare coordinate, model location or any other single position.
    Point(Coordinate),
    /// Line string or linear ring.
    Line(Vec<Coordinate>),
    /// Placemark. Its children are its geometries.
    Placemark,
    /// Multi-geometry or polygon. Children are geometries.
    GeometryCollection,
    /// Anything that has no location of its own.
    Other,
}

/// A node of a feature tree.
///
/// Implementors map their native representation into [`NodeKind`]. Child
/// lookup may fail, for instance when content has to be fetched remotely;
/// the walk then treats that subtree as contributing nothing.
pub trait FeatureNode: Sized {
    fn kind(&self) -> NodeKind;

    fn children(&self) -> Result<Vec<Self>>;

    fn has_children(&self) -> Result<bool> {
        Ok(!self.children()?.is_empty())
    }
}

/// An owned, in-memory feature tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Container(Vec<Feature>),
    GroundOverlay(LatLonBox),
    Point(Coordinate),
    Line(Vec<Coordinate>),
    Placemark(Vec<Feature>),
    GeometryCollection(Vec<Feature>),
    Other,
}

impl Feature {
    /// Placemark holding a single geometry.
    pub fn placemark(geometry: Feature) -> Self {
        Feature::Placemark(vec![geometry])
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.child_slice().iter().map(Feature::node_count).sum::<usize>()
    }

    fn child_slice(&self) -> &[Feature] {
        match self {
            Feature::Container(children)
            | Feature::Placemark(children)
            | Feature::GeometryCollection(children) => children,
            _ => &[],
        }
    }
}

impl<'a> FeatureNode for &'a Feature {
    fn kind(&self) -> NodeKind {
        match self {
            Feature::Container(_) => NodeKind::Container,
            Feature::GroundOverlay(llb) => NodeKind::GroundOverlay(*llb),
            Feature::Point(c) => NodeKind::Point(*c),
            Feature::Line(coords) => NodeKind::Line(coords.clone()),
            Feature::Placemark(_) => NodeKind::Placemark,
            Feature::GeometryCollection(_) => NodeKind::GeometryCollection,
            Feature::Other => NodeKind::Other,
        }
    }

    fn children(&self) -> Result<Vec<&'a Feature>> {
        let node: &'a Feature = *self;
        Ok(node.child_slice().iter().collect())
    }

    fn has_children(&self) -> Result<bool> {
        Ok(!self.child_slice().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_box_corners() {
        let llb = LatLonBox {
            north: 10.0,
            south: 0.0,
            east: 20.0,
            west: 5.0,
            altitude: 100.0,
        };
        let corners = llb.corners();
        assert_eq!(corners[0].latitude(), 10.0);
        assert_eq!(corners[0].longitude(), 20.0);
        assert_eq!(corners[3].latitude(), 0.0);
        assert_eq!(corners[3].longitude(), 5.0);
        assert!(corners.iter().all(|c| c.altitude() == 100.0));
    }

    #[test]
    fn test_kind_mapping() {
        let p = Feature::Point(Coordinate::from_lat_lng(1.0, 2.0));
        assert_eq!(
            (&p).kind(),
            NodeKind::Point(Coordinate::from_lat_lng(1.0, 2.0))
        );
        assert_eq!((&Feature::Other).kind(), NodeKind::Other);
        assert_eq!((&Feature::Container(vec![])).kind(), NodeKind::Container);
    }

    #[test]
    fn test_children_and_count() {
        let tree = Feature::Container(vec![
            Feature::placemark(Feature::Point(Coordinate::from_lat_lng(0.0, 0.0))),
            Feature::Other,
        ]);
        let root = &tree;
        assert!(root.has_children().unwrap());
        assert_eq!(root.children().unwrap().len(), 2);
        assert_eq!(tree.node_count(), 4);
        assert!(!(&Feature::Other).has_children().unwrap());
    }
}
