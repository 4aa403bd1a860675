//! Unit systems and the Earth constants the distance formulas depend on.

/// Mean radius of the Earth in kilometres.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Mean radius of the Earth in statute miles.
pub const EARTH_MEAN_RADIUS_MI: f64 = 3959.0;

/// Fixed kilometre to mile ratio.
pub const MILES_PER_KILOMETRE: f64 = 0.621371192;

pub const METRES_PER_KILOMETRE: f64 = 1000.0;

/// Unit system used for distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Units {
    /// Kilometres.
    #[default]
    Metric,
    /// Statute miles.
    Imperial,
}

impl Units {
    /// Returns the Earth mean radius expressed in this unit system.
    pub fn mean_radius(self) -> f64 {
        match self {
            Units::Metric => EARTH_MEAN_RADIUS_KM,
            Units::Imperial => EARTH_MEAN_RADIUS_MI,
        }
    }

    /// Converts a distance in kilometres into this unit system.
    pub fn from_kilometres(self, km: f64) -> f64 {
        match self {
            Units::Metric => km,
            Units::Imperial => km * MILES_PER_KILOMETRE,
        }
    }

    /// Short unit suffix for display.
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Metric => "km",
            Units::Imperial => "mi",
        }
    }
}
