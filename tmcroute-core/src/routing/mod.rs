//! Shortest path search and path expansion

pub mod dijkstra;
pub mod expand;
mod to_geojson;

use serde::Serialize;

use crate::Kilometers;

/// Result of a single start/end query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Minimal path, start and end inclusive
    pub shortest_path: Vec<String>,
    /// Shortest path with contiguous branch segments folded in
    pub complete_path: Vec<String>,
    /// Summed edge weight of the shortest path
    pub distance_km: Kilometers,
}
