use std::cmp::Ordering;

use crate::{Kilometers, NodeId};

#[derive(Copy, Clone, PartialEq)]
pub(super) struct State {
    pub(super) cost: Kilometers,
    pub(super) node: NodeId,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap),
        // ties broken by node id so pops are deterministic
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
