//! Command-line front-end: derive a route between two TMC segments.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use tmcroute_core::prelude::*;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.route_config()?;

    let network = if cli.no_progress {
        RouteNetwork::load(&config, &NoProgress)?
    } else {
        RouteNetwork::load(&config, &BarProgress::default())?
    };

    let route = network.route(&cli.start, &cli.end)?;
    info!(
        "Shortest Path has {} TMCs, Complete Path has {} TMCs ({:.3} km)",
        route.shortest_path.len(),
        route.complete_path.len(),
        route.distance_km
    );

    if let Some(path) = &cli.geojson {
        std::fs::write(path, route.to_geojson_string(network.catalog())?)?;
        info!("Wrote route geometry to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        println!("shortest_path: {}", route.shortest_path.join(" "));
        println!("complete_path: {}", route.complete_path.join(" "));
    }
    Ok(())
}
