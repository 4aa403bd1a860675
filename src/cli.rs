//! CLI argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{GeoError, Result};
use crate::logger::VerbosityLevel;
use crate::units::Units;
use crate::view::{ViewParams, WalkOptions};

/// Command line arguments for geoframe.
#[derive(Parser, Debug)]
#[command(name = "geoframe")]
#[command(version, about = "Compute the bounds of a GeoJSON document and a camera view framing it", long_about = None)]
pub struct Args {
    /// Path to the .geojson file.
    pub input: PathBuf,

    /// Viewport width over height.
    #[arg(short, long, default_value = "1.0")]
    pub aspect_ratio: f64,

    /// Camera range in metres for bounds without extent.
    #[arg(long, default_value = "1000.0")]
    pub default_range: f64,

    /// Multiplier applied to the computed camera range.
    #[arg(long, default_value = "1.5")]
    pub scale_range: f64,

    /// Upper limit applied to the reported range, in metres.
    #[arg(long)]
    pub max_range: Option<f64>,

    /// Skip ground overlays and placemark points.
    #[arg(long)]
    pub no_features: bool,

    /// Skip lines, polygons and multi-geometries.
    #[arg(long)]
    pub no_geometries: bool,

    /// Walk sibling subtrees in parallel.
    #[arg(short, long)]
    pub parallel: bool,

    /// Units for reported distances.
    #[arg(short, long, value_enum, default_value = "metric")]
    pub units: Units,

    /// Timestamped, detailed output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print values only.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Fully validated configuration object.
#[derive(Debug)]
pub struct Config {
    /// Path to the input GeoJSON document.
    pub input: PathBuf,
    /// Which parts of the tree to walk.
    pub walk: WalkOptions,
    /// Camera framing parameters.
    pub view: ViewParams,
    /// Optional cap on the reported range.
    pub max_range: Option<f64>,
    /// Use the parallel walk.
    pub parallel: bool,
    /// Units for reported distances.
    pub units: Units,
    /// Output verbosity.
    pub verbosity: VerbosityLevel,
    /// Disable colors.
    pub no_color: bool,
}

impl Args {
    /// Validates arguments and converts them to a structured `Config`.
    pub fn validate(self) -> Result<Config> {
        if self.verbose && self.quiet {
            return Err(GeoError::MutuallyExclusiveOptions(
                "verbose".to_string(),
                "quiet".to_string(),
            ));
        }

        if self.no_features && self.no_geometries {
            return Err(GeoError::NothingToWalk);
        }

        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(GeoError::InvalidAspectRatio(self.aspect_ratio));
        }

        check_range("default", self.default_range, true)?;
        check_range("scale", self.scale_range, false)?;
        if let Some(max) = self.max_range {
            check_range("max", max, false)?;
        }

        let verbosity = if self.verbose {
            VerbosityLevel::Verbose
        } else if self.quiet {
            VerbosityLevel::Quiet
        } else {
            VerbosityLevel::Normal
        };

        Ok(Config {
            input: self.input,
            walk: WalkOptions {
                features: !self.no_features,
                geometries: !self.no_geometries,
            },
            view: ViewParams {
                aspect_ratio: self.aspect_ratio,
                default_range: self.default_range,
                scale_range: self.scale_range,
            },
            max_range: self.max_range,
            parallel: self.parallel,
            units: self.units,
            verbosity,
            no_color: self.no_color,
        })
    }
}

/// Ranges must be finite and positive; zero is allowed where `allow_zero` is set.
fn check_range(name: &'static str, value: f64, allow_zero: bool) -> Result<()> {
    let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
    if ok {
        Ok(())
    } else {
        Err(GeoError::InvalidRange { name, value })
    }
}
