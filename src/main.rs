use anyhow::Context;
use clap::Parser;

use geoframe::cli::{Args, Config};
use geoframe::logger::{self, Logger};
use geoframe::units::Units;
use geoframe::{compute_bounds, compute_bounds_parallel, create_bounds_view, GeojsonReader};

fn main() {
    let args = Args::parse();
    let config = match args.validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    Logger::init(config.verbosity, config.no_color);

    if let Err(e) = run(&config) {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    logger::debug(&format!("Reading {}", config.input.display()));
    let reader = GeojsonReader::open(&config.input)
        .with_context(|| format!("cannot load {}", config.input.display()))?;
    logger::info(&format!(
        "Loaded {} ({} nodes)",
        config.input.display(),
        reader.root().node_count()
    ));

    let root = reader.root();
    let bounds = if config.parallel {
        compute_bounds_parallel(&root, config.walk)
    } else {
        compute_bounds(&root, config.walk)
    };

    if bounds.is_empty() {
        anyhow::bail!("no located features in {}", config.input.display());
    }

    let span = bounds.span();
    let diagonal = config.units.from_kilometres(bounds.southwest().distance(
        &bounds.northeast(),
        true,
        Units::Metric,
    ));

    logger::output("Bounds", &bounds.to_string());
    logger::output("Center", &bounds.center().to_string());
    logger::output(
        "Span",
        &format!("{:.6},{:.6},{:.1}", span.latitude, span.longitude, span.altitude),
    );
    logger::output(
        "Diagonal",
        &format!("{:.3} {}", diagonal, config.units.suffix()),
    );
    if bounds.crosses_antimeridian() {
        logger::warn("Bounds cross the antimeridian");
    }

    let view = create_bounds_view(&bounds, &config.view);
    let range = match config.max_range {
        Some(max) => view.clamped_range(max),
        None => view.range,
    };
    logger::output("View", &view.center.to_string());
    logger::output("Range", &format!("{:.1}", range));

    Ok(())
}
