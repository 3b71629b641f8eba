//! Data model for segment routing
//!
//! Contains the segment catalog and the weighted directed graph inferred
//! from it.

pub mod graph;
pub mod segment;

pub use graph::{DuplicateEdgePolicy, WeightedDigraph};
pub use segment::{SegmentCatalog, SegmentRecord};
