use std::path::PathBuf;

use clap::Parser;
use tmcroute_core::prelude::*;

#[derive(Debug, Parser)]
#[command(version, about = "Derive a route between two TMC road segments")]
pub struct Cli {
    /// TMC the route starts on
    #[arg(long)]
    pub start: String,

    /// TMC the route ends on
    #[arg(long)]
    pub end: String,

    /// TOML file with a route configuration; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Segment identification CSV
    #[arg(long)]
    pub identification: Option<PathBuf>,

    /// Edge CSV to write (or read with --reuse-edges)
    #[arg(long)]
    pub edges: Option<PathBuf>,

    /// Read the existing edge file instead of rebuilding it
    #[arg(long)]
    pub reuse_edges: bool,

    /// Maximum start-to-start distance of an edge, in kilometers
    #[arg(long, conflicts_with = "separation_from_lengths")]
    pub max_separation: Option<f64>,

    /// Use the longest segment in the catalog as the edge distance threshold
    #[arg(long)]
    pub separation_from_lengths: bool,

    /// Evaluate every segment pair instead of using the spatial index
    #[arg(long)]
    pub brute_force: bool,

    /// Keep the smallest weight for repeated edges instead of the last one
    #[arg(long)]
    pub keep_min_duplicates: bool,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the route as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the complete path as GeoJSON to this file
    #[arg(long)]
    pub geojson: Option<PathBuf>,
}

impl Cli {
    /// Configuration file (if any) with command-line overrides applied
    pub fn route_config(&self) -> Result<RouteConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
            None => RouteConfig::default(),
        };

        if let Some(path) = &self.identification {
            config.identification_path.clone_from(path);
        }
        if let Some(path) = &self.edges {
            config.edge_path.clone_from(path);
        }
        if self.reuse_edges {
            config.rebuild_edges = false;
        }
        if let Some(km) = self.max_separation {
            config.separation = SeparationPolicy::Fixed { km };
        }
        if self.separation_from_lengths {
            config.separation = SeparationPolicy::MaxSegmentLength;
        }
        if self.brute_force {
            config.index = IndexMode::BruteForce;
        }
        if self.keep_min_duplicates {
            config.duplicate_edges = DuplicateEdgePolicy::KeepMinimum;
        }
        Ok(config)
    }
}
