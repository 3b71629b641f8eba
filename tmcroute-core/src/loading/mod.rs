//! This module is responsible for loading segment identification data and
//! edge files, and for assembling a routable network from them.

mod builder;
mod catalog;
mod config;
mod edges;

pub use builder::RouteNetwork;
pub use catalog::{IDENTIFICATION_COLUMNS, read_catalog, read_catalog_file};
pub use config::{RouteConfig, SeparationPolicy};
pub use edges::{read_edges, read_edges_file, write_edges, write_edges_file};

pub use crate::model::DuplicateEdgePolicy;
pub use crate::proximity::IndexMode;
