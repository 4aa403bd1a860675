//! Normalized geographic coordinates.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{GeoError, Result};
use crate::maths;
use crate::units::Units;

/// How an altitude is interpreted.
///
/// The integer codes match the values the Earth plug-in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AltitudeMode {
    #[default]
    RelativeToGround,
    ClampToGround,
    Absolute,
    ClampToSeaFloor,
    RelativeToSeaFloor,
}

impl AltitudeMode {
    /// Returns the plug-in integer code for this mode.
    pub fn code(self) -> i32 {
        match self {
            AltitudeMode::RelativeToGround => 0,
            AltitudeMode::ClampToGround => 1,
            AltitudeMode::Absolute => 2,
            AltitudeMode::ClampToSeaFloor => 4,
            AltitudeMode::RelativeToSeaFloor => 5,
        }
    }
}

impl TryFrom<i32> for AltitudeMode {
    type Error = GeoError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(AltitudeMode::RelativeToGround),
            1 => Ok(AltitudeMode::ClampToGround),
            2 => Ok(AltitudeMode::Absolute),
            4 => Ok(AltitudeMode::ClampToSeaFloor),
            5 => Ok(AltitudeMode::RelativeToSeaFloor),
            other => Err(GeoError::InvalidAltitudeMode(other.to_string())),
        }
    }
}

impl FromStr for AltitudeMode {
    type Err = GeoError;

    /// Parses the KML spelling, e.g. `relativeToGround`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "relativeToGround" => Ok(AltitudeMode::RelativeToGround),
            "clampToGround" => Ok(AltitudeMode::ClampToGround),
            "absolute" => Ok(AltitudeMode::Absolute),
            "clampToSeaFloor" => Ok(AltitudeMode::ClampToSeaFloor),
            "relativeToSeaFloor" => Ok(AltitudeMode::RelativeToSeaFloor),
            other => Err(GeoError::InvalidAltitudeMode(other.to_string())),
        }
    }
}

/// A point on the globe with an optional altitude.
///
/// Latitude is clamped to [-90, 90] and longitude wrapped to (-180, 180] on
/// construction, so every `Coordinate` is normalized. Equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    altitude: f64,
    altitude_mode: AltitudeMode,
}

impl Coordinate {
    /// Creates a normalized coordinate. Altitude is in metres.
    pub fn new(latitude: f64, longitude: f64, altitude: f64, altitude_mode: AltitudeMode) -> Self {
        Self {
            latitude: maths::fix_latitude(latitude),
            longitude: maths::fix_longitude(longitude),
            altitude,
            altitude_mode,
        }
    }

    /// Creates a 2D coordinate with the default altitude mode.
    pub fn from_lat_lng(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0, AltitudeMode::default())
    }

    /// Creates a coordinate from `[lat, lng]`, `[lat, lng, alt]` or
    /// `[lat, lng, alt, mode]`, where `mode` is a plug-in altitude mode code.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            &[lat, lng] => Ok(Self::new(lat, lng, 0.0, AltitudeMode::default())),
            &[lat, lng, alt] => Ok(Self::new(lat, lng, alt, AltitudeMode::default())),
            &[lat, lng, alt, mode] => {
                if mode.fract() != 0.0 || mode < i32::MIN as f64 || mode > i32::MAX as f64 {
                    return Err(GeoError::InvalidAltitudeMode(mode.to_string()));
                }
                Ok(Self::new(lat, lng, alt, AltitudeMode::try_from(mode as i32)?))
            }
            _ => Err(GeoError::InvalidCoordinateArray(values.len())),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn altitude_mode(&self) -> AltitudeMode {
        self.altitude_mode
    }

    /// True when the altitude is non-zero.
    pub fn is_3d(&self) -> bool {
        self.altitude != 0.0
    }

    /// Great-circle distance to `other` in `units`.
    pub fn distance(&self, other: &Coordinate, haversine: bool, units: Units) -> f64 {
        if haversine {
            maths::distance_haversine(self, other, units)
        } else {
            maths::distance_cosine(self, other, units)
        }
    }

    /// Initial bearing towards `other`, in degrees.
    pub fn bearing_initial(&self, other: &Coordinate) -> f64 {
        maths::bearing_initial(self, other)
    }

    /// Final bearing on arrival at `other`, in degrees.
    pub fn bearing_final(&self, other: &Coordinate) -> f64 {
        maths::bearing_final(self, other)
    }

    /// Point reached after travelling `distance` along `bearing` (degrees).
    pub fn destination(&self, distance: f64, bearing: f64, units: Units) -> Coordinate {
        maths::destination(self, distance, maths::degrees_to_radians(bearing), units)
    }

    /// Returns a copy with the altitude dropped.
    pub fn flatten(&self) -> Coordinate {
        Coordinate {
            altitude: 0.0,
            ..*self
        }
    }

    /// Same copy with a different altitude.
    pub fn with_altitude(&self, altitude: f64) -> Coordinate {
        Coordinate { altitude, ..*self }
    }

    /// Compares latitude and longitude only.
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Adding +0.0 folds -0.0 into 0.0, matching `==`.
        (self.latitude + 0.0).to_bits().hash(state);
        (self.longitude + 0.0).to_bits().hash(state);
        (self.altitude + 0.0).to_bits().hash(state);
        self.altitude_mode.hash(state);
    }
}

impl TryFrom<&[f64]> for Coordinate {
    type Error = GeoError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Coordinate::from_slice(values)
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Coordinate::from_lat_lng(c.y, c.x)
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Coordinate::from(p.0)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point(c.into())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_3d() {
            write!(f, "{},{},{}", self.latitude, self.longitude, self.altitude)
        } else {
            write!(f, "{},{}", self.latitude, self.longitude)
        }
    }
}
