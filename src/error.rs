use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Coordinate array must have 2, 3 or 4 values, got {0}")]
    InvalidCoordinateArray(usize),

    #[error("Bounds array must have 4 or 6 values, got {0}")]
    InvalidBoundsArray(usize),

    #[error("Unknown altitude mode: {0}")]
    InvalidAltitudeMode(String),

    #[error("Children unavailable: {0}")]
    ChildrenUnavailable(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("GeoJSON parse error: {0}")]
    GeojsonParse(String),

    #[error("No features or geometries found in the GeoJSON document")]
    EmptyGeojson,

    #[error("Aspect ratio must be positive, got: {0}")]
    InvalidAspectRatio(f64),

    #[error("Invalid {name} range: {value}")]
    InvalidRange { name: &'static str, value: f64 },

    #[error("Options --no-features and --no-geometries leave nothing to walk")]
    NothingToWalk,

    #[error("Options --{0} and --{1} are mutually exclusive")]
    MutuallyExclusiveOptions(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
