//! Geographic bounding boxes that may wrap across the antimeridian.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::coordinate::Coordinate;
use crate::error::{GeoError, Result};
use crate::maths;

/// Tolerance used when deciding whether a box wraps the whole globe.
const FULL_LONGITUDE_TOLERANCE: f64 = 1e-9;

/// Slack for rounding when comparing arc lengths.
const ARC_TOLERANCE: f64 = 1e-9;

/// Extent of a bounds along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Degrees of latitude.
    pub latitude: f64,
    /// Degrees of longitude, measured eastwards from the west edge.
    pub longitude: f64,
    /// Metres of altitude, zero for 2D bounds.
    pub altitude: f64,
}

/// An axis-aligned box defined by its southwest and northeast corners.
///
/// A west edge numerically greater than the east edge means the box crosses
/// the antimeridian. Emptiness is tracked explicitly, so a single point at
/// (0, 0) is a real, non-empty bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounds {
    southwest: Coordinate,
    northeast: Coordinate,
    initialized: bool,
}

impl Bounds {
    /// Creates empty bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates bounds covering a single coordinate.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            southwest: coordinate,
            northeast: coordinate,
            initialized: true,
        }
    }

    /// Creates bounds from two corners.
    ///
    /// Fails when the southwest corner lies north of, or above, the northeast one.
    /// Longitudes are unconstrained: `west > east` denotes a wraparound box.
    pub fn from_corners(southwest: Coordinate, northeast: Coordinate) -> Result<Self> {
        if southwest.latitude() > northeast.latitude() {
            return Err(GeoError::InvalidBounds(format!(
                "south ({}) must not be greater than north ({})",
                southwest.latitude(),
                northeast.latitude()
            )));
        }
        if southwest.altitude() > northeast.altitude() {
            return Err(GeoError::InvalidBounds(format!(
                "bottom ({}) must not be greater than top ({})",
                southwest.altitude(),
                northeast.altitude()
            )));
        }

        Ok(Self {
            southwest,
            northeast,
            initialized: true,
        })
    }

    /// Creates bounds from `[south, west, north, east]` or
    /// `[south, west, bottom, north, east, top]`.
    pub fn from_array(values: &[f64]) -> Result<Self> {
        match values {
            &[south, west, north, east] => Self::from_corners(
                Coordinate::from_lat_lng(south, west),
                Coordinate::from_lat_lng(north, east),
            ),
            &[south, west, bottom, north, east, top] => Self::from_corners(
                Coordinate::new(south, west, bottom, Default::default()),
                Coordinate::new(north, east, top, Default::default()),
            ),
            _ => Err(GeoError::InvalidBoundsArray(values.len())),
        }
    }

    pub fn southwest(&self) -> Coordinate {
        self.southwest
    }

    pub fn northeast(&self) -> Coordinate {
        self.northeast
    }

    pub fn north(&self) -> f64 {
        self.northeast.latitude()
    }

    pub fn south(&self) -> f64 {
        self.southwest.latitude()
    }

    pub fn east(&self) -> f64 {
        self.northeast.longitude()
    }

    pub fn west(&self) -> f64 {
        self.southwest.longitude()
    }

    pub fn top(&self) -> f64 {
        self.northeast.altitude()
    }

    pub fn bottom(&self) -> f64 {
        self.southwest.altitude()
    }

    /// True until the first coordinate is added.
    pub fn is_empty(&self) -> bool {
        !self.initialized
    }

    pub fn is_3d(&self) -> bool {
        self.southwest.is_3d() || self.northeast.is_3d()
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west() > self.east()
    }

    pub fn is_full_latitude(&self) -> bool {
        self.south() == -90.0 && self.north() == 90.0
    }

    pub fn is_full_longitude(&self) -> bool {
        longitudinal_span(self.west(), self.east()) >= 360.0 - FULL_LONGITUDE_TOLERANCE
    }

    /// Tests whether `coordinate` lies inside the box.
    ///
    /// Altitude is only checked for 3D bounds.
    pub fn contains_coordinate(&self, coordinate: &Coordinate) -> bool {
        if self.is_empty() {
            return false;
        }

        let lat = coordinate.latitude();
        if lat < self.south() || lat > self.north() {
            return false;
        }

        if self.is_3d() {
            let alt = coordinate.altitude();
            if alt < self.bottom() || alt > self.top() {
                return false;
            }
        }

        self.contains_longitude(coordinate.longitude())
    }

    /// Tests a longitude against the east/west edges, honouring wraparound.
    pub fn contains_longitude(&self, longitude: f64) -> bool {
        if self.is_full_longitude() {
            true
        } else if self.crosses_antimeridian() {
            longitude <= self.east() || longitude >= self.west()
        } else {
            self.west() <= longitude && longitude <= self.east()
        }
    }

    /// Midpoint of the box. Longitude is measured along the box, so wrapping
    /// boxes are centered on their actual middle.
    pub fn center(&self) -> Coordinate {
        let lat = (self.south() + self.north()) / 2.0;
        let lng = maths::fix_longitude(self.west() + longitudinal_span(self.west(), self.east()) / 2.0);
        let alt = (self.bottom() + self.top()) / 2.0;
        Coordinate::new(lat, lng, alt, self.southwest.altitude_mode())
    }

    pub fn span(&self) -> Span {
        Span {
            latitude: self.north() - self.south(),
            longitude: longitudinal_span(self.west(), self.east()),
            altitude: if self.is_3d() {
                self.top() - self.bottom()
            } else {
                0.0
            },
        }
    }

    /// Grows the box by the least amount needed to contain `coordinate`.
    ///
    /// When the longitude is outside, the box grows towards whichever of east
    /// or west gives the narrower result. East wins ties.
    pub fn extend(&mut self, coordinate: Coordinate) {
        if self.contains_coordinate(&coordinate) {
            return;
        }

        if self.is_empty() {
            *self = Self::from_coordinate(coordinate);
            return;
        }

        let south = self.south().min(coordinate.latitude());
        let north = self.north().max(coordinate.latitude());
        let bottom = self.bottom().min(coordinate.altitude());
        let top = self.top().max(coordinate.altitude());

        let mut west = self.west();
        let mut east = self.east();
        if !self.contains_longitude(coordinate.longitude()) {
            let extend_east_span = longitudinal_span(west, coordinate.longitude());
            let extend_west_span = longitudinal_span(coordinate.longitude(), east);
            if extend_east_span <= extend_west_span {
                east = coordinate.longitude();
            } else {
                west = coordinate.longitude();
            }
        }

        self.southwest = Coordinate::new(south, west, bottom, self.southwest.altitude_mode());
        self.northeast = Coordinate::new(north, east, top, self.northeast.altitude_mode());
    }

    /// Returns a copy extended by `coordinate`.
    pub fn extended(mut self, coordinate: Coordinate) -> Self {
        self.extend(coordinate);
        self
    }

    /// Merges two bounds. Empty bounds are the identity.
    ///
    /// The result contains both inputs. Longitudes merge as arcs: the
    /// narrowest eastward arc covering both east/west ranges is kept, and when
    /// no arc short of the whole globe covers them the result is full longitude.
    pub fn union(&self, other: &Bounds) -> Bounds {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }

        let (west, east) = merge_arcs((self.west(), self.east()), (other.west(), other.east()));
        Self {
            southwest: Coordinate::new(
                self.south().min(other.south()),
                west,
                self.bottom().min(other.bottom()),
                self.southwest.altitude_mode(),
            ),
            northeast: Coordinate::new(
                self.north().max(other.north()),
                east,
                self.top().max(other.top()),
                self.northeast.altitude_mode(),
            ),
            initialized: true,
        }
    }

    /// Converts to a `geo::Rect`, which cannot express empty or wrapping boxes.
    pub fn to_rect(&self) -> Option<geo::Rect<f64>> {
        if self.is_empty() || self.crosses_antimeridian() {
            return None;
        }
        Some(geo::Rect::new(self.southwest, self.northeast))
    }
}

/// Degrees travelled eastwards from `west` to `east`, wrapping at 180.
pub fn longitudinal_span(west: f64, east: f64) -> f64 {
    if west <= east {
        east - west
    } else {
        east + 360.0 - west
    }
}

/// Longitude arc as `(west, east)`, read eastwards.
type LongitudeArc = (f64, f64);

fn arc_span(arc: LongitudeArc) -> f64 {
    longitudinal_span(arc.0, arc.1)
}

fn is_full_arc(arc: LongitudeArc) -> bool {
    arc_span(arc) >= 360.0 - FULL_LONGITUDE_TOLERANCE
}

fn arc_contains(outer: LongitudeArc, inner: LongitudeArc) -> bool {
    is_full_arc(outer)
        || longitudinal_span(outer.0, inner.0) + arc_span(inner) <= arc_span(outer) + ARC_TOLERANCE
}

/// Narrowest arc holding both `a` and `b`. Candidates are either input or an
/// arc running from one input's west edge to the other's east edge.
fn merge_arcs(a: LongitudeArc, b: LongitudeArc) -> LongitudeArc {
    [a, b, (a.0, b.1), (b.0, a.1)]
        .into_iter()
        .filter(|&arc| arc_contains(arc, a) && arc_contains(arc, b))
        .min_by(|x, y| arc_span(*x).total_cmp(&arc_span(*y)))
        .unwrap_or_else(|| full_arc(a.0))
}

/// Whole-globe arc starting at `west`. Normalized longitudes cannot span
/// exactly 360 degrees, so the east edge sits just short of `west`.
fn full_arc(west: f64) -> LongitudeArc {
    (west, maths::fix_longitude(west - FULL_LONGITUDE_TOLERANCE / 2.0))
}

impl PartialEq for Bounds {
    fn eq(&self, other: &Self) -> bool {
        self.initialized == other.initialized
            && self.southwest == other.southwest
            && self.northeast == other.northeast
    }
}

impl Hash for Bounds {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.initialized.hash(state);
        self.southwest.hash(state);
        self.northeast.hash(state);
    }
}

impl From<Coordinate> for Bounds {
    fn from(coordinate: Coordinate) -> Self {
        Bounds::from_coordinate(coordinate)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "empty");
        }
        write!(f, "{},{},{},{}", self.south(), self.west(), self.north(), self.east())
    }
}
