//! Single-source shortest paths with early exit at a target

mod state;

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::trace;

use crate::{Error, Kilometers, NodeId, WeightedDigraph};
use state::State;

/// Distances and predecessors of every node settled before the search
/// halted.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeId,
    distances: Vec<Kilometers>,
    predecessors: Vec<Option<NodeId>>,
    settled: FixedBitSet,
    order: Vec<NodeId>,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Final distance of a settled node
    pub fn distance(&self, node: NodeId) -> Option<Kilometers> {
        self.is_settled(node).then(|| self.distances[node])
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        if self.is_settled(node) {
            self.predecessors[node]
        } else {
            None
        }
    }

    pub fn is_settled(&self, node: NodeId) -> bool {
        self.settled.contains(node)
    }

    /// Nodes in the order they were settled
    pub fn settled_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Follows predecessors back from `target` to the source.
    ///
    /// Returns `None` when `target` was never settled.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_settled(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.predecessors[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Dijkstra's algorithm from `start`, stopping once `target` is settled.
///
/// The frontier is a binary heap with lazy invalidation: superseded entries
/// stay in the heap and are discarded when popped.
///
/// # Errors
///
/// Returns [`Error::OrderingViolation`] if relaxing an edge would improve a
/// node that is already settled, which cannot happen with non-negative
/// weights.
pub fn shortest_path_tree(
    graph: &WeightedDigraph,
    start: NodeId,
    target: Option<NodeId>,
) -> Result<ShortestPathTree, Error> {
    let node_count = graph.node_count();
    let mut tentative = vec![f64::INFINITY; node_count];
    let mut predecessors: Vec<Option<NodeId>> = vec![None; node_count];
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut order = Vec::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    tentative[start] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry for a node settled earlier or improved since
        if settled.contains(node) || cost > tentative[node] {
            continue;
        }
        settled.insert(node);
        order.push(node);

        if target == Some(node) {
            break;
        }

        for &(next, weight) in graph.neighbors(node) {
            let candidate = cost + weight;

            if settled.contains(next) {
                if candidate < tentative[next] {
                    return Err(Error::OrderingViolation {
                        node: graph.tmc(next).to_string(),
                        settled: tentative[next],
                        candidate,
                    });
                }
                continue;
            }

            if candidate < tentative[next] {
                tentative[next] = candidate;
                predecessors[next] = Some(node);
                heap.push(State {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    trace!(
        "Settled {} of {} nodes from {}",
        order.len(),
        node_count,
        graph.tmc(start)
    );

    Ok(ShortestPathTree {
        source: start,
        distances: tentative,
        predecessors,
        settled,
        order,
    })
}

/// Minimum-weight path between two TMCs with its total weight.
///
/// # Errors
///
/// Returns [`Error::NoPathFound`] when `end` cannot be reached from `start`
/// (including when either is absent from the graph).
pub fn shortest_path(
    graph: &WeightedDigraph,
    start: &str,
    end: &str,
) -> Result<(Vec<String>, Kilometers), Error> {
    let no_path = || Error::NoPathFound {
        start: start.to_string(),
        end: end.to_string(),
    };

    if start == end {
        return Ok((vec![start.to_string()], 0.0));
    }
    let source = graph.node_id(start).ok_or_else(no_path)?;
    let target = graph.node_id(end).ok_or_else(no_path)?;

    let tree = shortest_path_tree(graph, source, Some(target))?;
    let path = tree.path_to(target).ok_or_else(no_path)?;
    let distance = tree.distance(target).ok_or_else(no_path)?;

    Ok((
        path.into_iter().map(|node| graph.tmc(node).to_string()).collect(),
        distance,
    ))
}
