pub use crate::{Error, Kilometers, NodeId};

// Loading and configuration
pub use crate::loading::{
    DuplicateEdgePolicy, IndexMode, RouteConfig, RouteNetwork, SeparationPolicy, read_edges,
    write_edges,
};

// Data model
pub use crate::model::{SegmentCatalog, SegmentRecord, WeightedDigraph};

// Graph inference
pub use crate::proximity::{Edge, ProximityGraphBuilder, great_circle_distance};

// Routing
pub use crate::routing::dijkstra::{ShortestPathTree, shortest_path, shortest_path_tree};
pub use crate::routing::expand::{PathExpander, expand_path};
pub use crate::routing::Route;

// Progress reporting
pub use crate::progress::{BarProgress, NoProgress, Progress, ProgressConfig};
