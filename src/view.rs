//! Bounds accumulation over a feature tree and camera framing.
//!
//! The walk visits a tree depth-first, threading an immutable [`Bounds`]
//! through the recursion. [`compute_bounds_parallel`] visits siblings with
//! rayon instead and merges the per-subtree results with [`Bounds::union`].

use std::fmt;

use rayon::prelude::*;

use crate::bounds::Bounds;
use crate::coordinate::Coordinate;
use crate::feature::{FeatureNode, NodeKind};
use crate::logger;
use crate::maths::{constrain_value, degrees_to_radians, distance_cosine};
use crate::units::{Units, EARTH_MEAN_RADIUS_KM, METRES_PER_KILOMETRE};

/// Earth mean radius in metres, the unit camera ranges are expressed in.
const EARTH_MEAN_RADIUS_M: f64 = EARTH_MEAN_RADIUS_KM * METRES_PER_KILOMETRE;

/// Which content the walk collects.
///
/// Containers are always walked through; the switches only decide what the
/// nodes found along the way contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Collect feature locations: ground overlays and placemark points.
    pub features: bool,
    /// Collect placemark geometries, multi-geometries and polygons.
    pub geometries: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            features: true,
            geometries: true,
        }
    }
}

/// Tuning for [`create_bounds_view`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Width over height of the viewport.
    pub aspect_ratio: f64,
    /// Range in metres used when the bounds have no extent.
    pub default_range: f64,
    /// Multiplier applied to the computed range.
    pub scale_range: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            default_range: 1000.0,
            scale_range: 1.5,
        }
    }
}

/// Camera descriptor framing a bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsView {
    /// Look-at point. Its altitude is the top of the bounds.
    pub center: Coordinate,
    /// Camera distance from `center` in metres.
    pub range: f64,
}

impl BoundsView {
    /// Range limited to [0, max]. NaN or infinite ranges come back as `max`.
    pub fn clamped_range(&self, max: f64) -> f64 {
        if self.range.is_finite() {
            constrain_value(self.range, 0.0, max)
        } else {
            max
        }
    }
}

impl fmt::Display for BoundsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} range {:.1}m", self.center, self.range)
    }
}

/// Computes the bounds of everything under `root`.
pub fn compute_bounds<N: FeatureNode>(root: &N, options: WalkOptions) -> Bounds {
    visit(root, root.kind(), options, Bounds::new())
}

/// Same as [`compute_bounds`], with sibling subtrees walked in parallel.
///
/// Subtrees are merged with [`Bounds::union`], so every walked coordinate is
/// contained. For trees whose points straddle the antimeridian the chosen
/// east/west edges can differ from the sequential walk.
pub fn compute_bounds_parallel<N>(root: &N, options: WalkOptions) -> Bounds
where
    N: FeatureNode + Send + Sync,
{
    visit_parallel(root, root.kind(), options)
}

fn visit<N: FeatureNode>(node: &N, kind: NodeKind, options: WalkOptions, bounds: Bounds) -> Bounds {
    match kind {
        NodeKind::GroundOverlay(llb) if options.features => {
            llb.corners().into_iter().fold(bounds, Bounds::extended)
        }
        NodeKind::Point(coordinate) => bounds.extended(coordinate),
        NodeKind::Line(coordinates) => coordinates.into_iter().fold(bounds, Bounds::extended),
        NodeKind::Placemark => children_of(node).iter().fold(bounds, |acc, child| {
            let kind = child.kind();
            if follows_placemark_child(&kind, options) {
                visit(child, kind, options, acc)
            } else {
                acc
            }
        }),
        NodeKind::Container => visit_children(node, options, bounds),
        NodeKind::GeometryCollection if options.geometries => {
            visit_children(node, options, bounds)
        }
        _ => bounds,
    }
}

fn visit_children<N: FeatureNode>(node: &N, options: WalkOptions, bounds: Bounds) -> Bounds {
    children_of(node).iter().fold(bounds, |acc, child| {
        visit(child, child.kind(), options, acc)
    })
}

fn visit_parallel<N>(node: &N, kind: NodeKind, options: WalkOptions) -> Bounds
where
    N: FeatureNode + Send + Sync,
{
    let placemark = matches!(kind, NodeKind::Placemark);
    let descend = match kind {
        NodeKind::Container | NodeKind::Placemark => true,
        NodeKind::GeometryCollection => options.geometries,
        _ => false,
    };
    if !descend {
        return visit(node, kind, options, Bounds::new());
    }

    children_of(node)
        .par_iter()
        .map(|child| {
            let kind = child.kind();
            if placemark && !follows_placemark_child(&kind, options) {
                Bounds::new()
            } else {
                visit_parallel(child, kind, options)
            }
        })
        .reduce(Bounds::new, |a, b| a.union(&b))
}

/// A placemark point is feature content; anything else under a placemark is
/// geometry.
fn follows_placemark_child(kind: &NodeKind, options: WalkOptions) -> bool {
    match kind {
        NodeKind::Point(_) => options.features,
        _ => options.geometries,
    }
}

/// Children of `node`, or none when they cannot be resolved.
fn children_of<N: FeatureNode>(node: &N) -> Vec<N> {
    let children = node.has_children().and_then(|has| {
        if has {
            node.children()
        } else {
            Ok(Vec::new())
        }
    });

    match children {
        Ok(children) => children,
        Err(e) => {
            logger::debug(&format!("Skipping subtree: {}", e));
            Vec::new()
        }
    }
}

/// Derives a camera that frames `bounds`.
///
/// The range comes from an empirically tuned formula; it is kept exactly as
/// is because camera framing behaviour depends on its shape.
pub fn create_bounds_view(bounds: &Bounds, params: &ViewParams) -> BoundsView {
    let center = bounds.center().with_altitude(bounds.top());

    let span = bounds.span();
    if span.latitude == 0.0 && span.longitude == 0.0 {
        return BoundsView {
            center,
            range: params.default_range,
        };
    }

    let dist_ew = distance_cosine(
        &Coordinate::from_lat_lng(center.latitude(), bounds.east()),
        &Coordinate::from_lat_lng(center.latitude(), bounds.west()),
        Units::Metric,
    ) * METRES_PER_KILOMETRE;
    let dist_ns = distance_cosine(
        &Coordinate::from_lat_lng(bounds.north(), center.longitude()),
        &Coordinate::from_lat_lng(bounds.south(), center.longitude()),
        Units::Metric,
    ) * METRES_PER_KILOMETRE;

    let aspect_ratio = params.aspect_ratio.max(dist_ew / dist_ns).min(1.0);

    let alpha = degrees_to_radians(45.0 / (aspect_ratio + 0.4) - 2.0);
    let expand_distance = dist_ns.max(dist_ew);
    let beta = degrees_to_radians(90.0).min(alpha + expand_distance / (2.0 * EARTH_MEAN_RADIUS_M));
    let range = params.scale_range
        * EARTH_MEAN_RADIUS_M
        * (beta.sin() * (1.0 + 1.0 / alpha.tan().powi(2)).sqrt() - 1.0);

    logger::debug(&format!(
        "Framing {}: ew={:.1}m ns={:.1}m aspect={:.3} range={:.1}m",
        bounds, dist_ew, dist_ns, aspect_ratio, range
    ));

    BoundsView { center, range }
}
