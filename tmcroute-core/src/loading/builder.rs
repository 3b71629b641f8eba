use log::{debug, info};

use super::catalog::read_catalog_file;
use super::config::RouteConfig;
use super::edges::{read_edges_file, write_edges_file};
use crate::{
    Error, Route, SegmentCatalog, WeightedDigraph,
    model::DuplicateEdgePolicy,
    progress::Progress,
    proximity::{Edge, ProximityGraphBuilder},
    routing::{dijkstra::shortest_path, expand::PathExpander},
};

/// Segment catalog together with the graph inferred from it.
///
/// Built once per run and read-only afterwards; any number of queries can
/// be answered against it.
#[derive(Debug, Clone)]
pub struct RouteNetwork {
    catalog: SegmentCatalog,
    graph: WeightedDigraph,
}

impl RouteNetwork {
    /// Loads the catalog and either rebuilds the edge file or reuses the
    /// existing one, as configured
    ///
    /// # Errors
    ///
    /// Returns an error if there are problems reading, writing or
    /// validating data
    pub fn load(config: &RouteConfig, progress: &dyn Progress) -> Result<Self, Error> {
        config.validate()?;

        info!(
            "Reading identification data: {}",
            config.identification_path.display()
        );
        let catalog = read_catalog_file(&config.identification_path)?;

        let edges = if config.rebuild_edges {
            let max_separation = config.separation.resolve(&catalog)?;
            let edges = ProximityGraphBuilder::new(&catalog, max_separation)
                .with_index_mode(config.index)
                .build(progress);
            write_edges_file(&config.edge_path, &edges)?;
            edges
        } else {
            read_edges_file(&config.edge_path)?
        };

        Self::from_parts(catalog, &edges, config.duplicate_edges)
    }

    /// Assembles a network from an in-memory catalog and edge list
    pub fn from_parts(
        catalog: SegmentCatalog,
        edges: &[Edge],
        policy: DuplicateEdgePolicy,
    ) -> Result<Self, Error> {
        let graph = WeightedDigraph::from_edges(edges, policy)?;
        Ok(Self { catalog, graph })
    }

    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &WeightedDigraph {
        &self.graph
    }

    /// Shortest and complete path from `start` to `end`
    ///
    /// # Errors
    ///
    /// - [`Error::MissingRecord`] if either TMC is not in the catalog
    /// - [`Error::NoPathFound`] if `end` is unreachable
    /// - [`Error::OrderingViolation`] if the search detects a settled node
    ///   being improved
    /// - [`Error::MalformedNumericField`] if a coordinate needed for
    ///   expansion does not parse
    pub fn route(&self, start: &str, end: &str) -> Result<Route, Error> {
        self.catalog.record(start)?;
        self.catalog.record(end)?;

        let (shortest_path, distance_km) = shortest_path(&self.graph, start, end)?;
        debug!(
            "Shortest path has {} TMCs ({distance_km:.3} km)",
            shortest_path.len()
        );

        let complete_path =
            PathExpander::new(&self.graph, &self.catalog).expand(&shortest_path, end)?;
        debug!("Complete path has {} TMCs", complete_path.len());

        Ok(Route {
            shortest_path,
            complete_path,
            distance_km,
        })
    }
}
