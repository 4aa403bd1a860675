//! geoframe - geodesy and view framing for feature trees
//!
//! geoframe computes the geographic bounds of a hierarchical feature tree
//! (documents, folders, placemarks, geometries) and derives a camera range
//! that frames those bounds.
//!
//! # Examples
//!
//! ```
//! use geoframe::{compute_bounds, create_bounds_view, Coordinate, Feature, ViewParams, WalkOptions};
//!
//! let tree = Feature::Container(vec![
//!     Feature::Point(Coordinate::from_lat_lng(0.0, 0.0)),
//!     Feature::Point(Coordinate::from_lat_lng(10.0, 10.0)),
//! ]);
//!
//! let bounds = compute_bounds(&&tree, WalkOptions::default());
//! let view = create_bounds_view(&bounds, &ViewParams::default());
//! assert_eq!(view.center.latitude(), 5.0);
//! assert!(view.range > 0.0);
//! ```

pub mod bounds;
pub mod cli;
pub mod coordinate;
pub mod error;
pub mod feature;
pub mod geojson;
pub mod logger;
pub mod maths;
pub mod units;
pub mod view;

pub use crate::bounds::{longitudinal_span, Bounds, Span};
pub use crate::coordinate::{AltitudeMode, Coordinate};
pub use crate::error::{GeoError, Result};
pub use crate::feature::{Feature, FeatureNode, LatLonBox, NodeKind};
pub use crate::geojson::GeojsonReader;
pub use crate::units::Units;
pub use crate::view::{
    compute_bounds, compute_bounds_parallel, create_bounds_view, BoundsView, ViewParams,
    WalkOptions,
};
