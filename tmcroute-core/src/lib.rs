//! Route derivation between directional road segments (TMCs).
//!
//! The pipeline infers a weighted directed graph from segment coordinates
//! and compass directions, finds a minimum-weight path between two segments
//! and expands it with directly contiguous segments.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod progress;
pub mod proximity;
pub mod routing;

pub use error::Error;
pub use loading::{RouteConfig, RouteNetwork};
pub use model::{SegmentCatalog, SegmentRecord, WeightedDigraph};
pub use routing::Route;

/// Dense node index into a [`WeightedDigraph`]
pub type NodeId = usize;

/// Great-circle distance in kilometers
pub type Kilometers = f64;

/// Kilometers per statute mile
pub const KM_PER_MILE: f64 = 1.609_344;
