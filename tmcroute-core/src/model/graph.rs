//! Adjacency structure over segment ids consumed by the solver

use hashbrown::{HashMap, hash_map::Entry};
use log::info;
use serde::Deserialize;

use crate::{Error, Kilometers, NodeId, proximity::Edge};

/// How repeated `(from, to)` pairs in an edge list are merged.
///
/// Either way the neighbor keeps the position of its first occurrence, so
/// iteration order over a node's neighbors is fixed by the edge list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// The weight of the last occurrence replaces earlier ones
    #[default]
    LastWriteWins,
    /// The smallest weight among all occurrences is kept
    KeepMinimum,
}

/// Directed graph keyed by TMC with non-negative edge weights.
///
/// TMCs are interned to dense [`NodeId`]s in order of first appearance in
/// the edge list.
#[derive(Debug, Clone, Default)]
pub struct WeightedDigraph {
    ids: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<(NodeId, Kilometers)>>,
    edge_count: usize,
}

impl WeightedDigraph {
    /// Groups the edge list by source segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a negative or NaN weight.
    pub fn from_edges<'a, I>(edges: I, policy: DuplicateEdgePolicy) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut graph = WeightedDigraph::default();
        let mut slots: HashMap<(NodeId, NodeId), usize> = HashMap::new();
        let mut duplicates = 0usize;

        for edge in edges {
            if edge.weight.is_nan() || edge.weight < 0.0 {
                return Err(Error::InvalidData(format!(
                    "edge {} -> {} has invalid weight {}",
                    edge.from, edge.to, edge.weight
                )));
            }
            let from = graph.intern(&edge.from);
            let to = graph.intern(&edge.to);
            let neighbors = &mut graph.adjacency[from];

            match slots.entry((from, to)) {
                Entry::Vacant(entry) => {
                    entry.insert(neighbors.len());
                    neighbors.push((to, edge.weight));
                    graph.edge_count += 1;
                }
                Entry::Occupied(entry) => {
                    duplicates += 1;
                    let weight = &mut neighbors[*entry.get()].1;
                    match policy {
                        DuplicateEdgePolicy::LastWriteWins => *weight = edge.weight,
                        DuplicateEdgePolicy::KeepMinimum => *weight = weight.min(edge.weight),
                    }
                }
            }
        }

        if duplicates > 0 {
            log::debug!("Merged {duplicates} duplicate edges ({policy:?})");
        }
        info!(
            "Identified {} nodes and their respective connectors",
            graph.source_count()
        );
        Ok(graph)
    }

    fn intern(&mut self, tmc: &str) -> NodeId {
        if let Some(&id) = self.index.get(tmc) {
            return id;
        }
        let id = self.ids.len();
        self.ids.push(tmc.to_string());
        self.index.insert(tmc.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    pub fn node_id(&self, tmc: &str) -> Option<NodeId> {
        self.index.get(tmc).copied()
    }

    /// TMC of an interned node
    pub fn tmc(&self, node: NodeId) -> &str {
        &self.ids[node]
    }

    /// Outgoing `(neighbor, weight)` pairs in edge-list order
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, Kilometers)] {
        &self.adjacency[node]
    }

    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<Kilometers> {
        self.neighbors(from)
            .iter()
            .find(|(neighbor, _)| *neighbor == to)
            .map(|(_, weight)| *weight)
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct `(from, to)` pairs
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of nodes with at least one outgoing edge
    pub fn source_count(&self) -> usize {
        self.adjacency.iter().filter(|n| !n.is_empty()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn edge(from: &str, to: &str, weight: f64) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            weight,
            from_dir: None,
            to_dir: None,
        }
    }

    /// Cormen, Leiserson and Rivest, Introduction to Algorithms, 1st ed., p. 528
    pub(crate) fn clr_graph() -> WeightedDigraph {
        let edges = [
            edge("s", "u", 10.0),
            edge("s", "x", 5.0),
            edge("u", "v", 1.0),
            edge("u", "x", 2.0),
            edge("v", "y", 4.0),
            edge("x", "u", 3.0),
            edge("x", "v", 9.0),
            edge("x", "y", 2.0),
            edge("y", "s", 7.0),
            edge("y", "v", 6.0),
        ];
        WeightedDigraph::from_edges(&edges, DuplicateEdgePolicy::default()).unwrap()
    }

    #[test]
    fn groups_by_source() {
        let graph = clr_graph();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 10);

        let x = graph.node_id("x").unwrap();
        let targets: Vec<&str> = graph.neighbors(x).iter().map(|(n, _)| graph.tmc(*n)).collect();
        assert_eq!(targets, ["u", "v", "y"]);
    }

    #[test]
    fn last_write_wins_by_default() {
        let edges = [edge("a", "b", 3.0), edge("a", "c", 1.0), edge("a", "b", 7.0)];
        let graph = WeightedDigraph::from_edges(&edges, DuplicateEdgePolicy::LastWriteWins).unwrap();
        let (a, b) = (graph.node_id("a").unwrap(), graph.node_id("b").unwrap());

        assert_eq!(graph.weight(a, b), Some(7.0));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(a)[0].0, b);
    }

    #[test]
    fn keep_minimum_policy() {
        let edges = [edge("a", "b", 3.0), edge("a", "b", 7.0), edge("a", "b", 2.0)];
        let graph = WeightedDigraph::from_edges(&edges, DuplicateEdgePolicy::KeepMinimum).unwrap();
        let (a, b) = (graph.node_id("a").unwrap(), graph.node_id("b").unwrap());

        assert_eq!(graph.weight(a, b), Some(2.0));
    }

    #[test]
    fn rejects_negative_weights() {
        let edges = [edge("a", "b", -1.0)];
        let result = WeightedDigraph::from_edges(&edges, DuplicateEdgePolicy::default());
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn target_only_nodes_are_interned() {
        let edges = [edge("a", "b", 1.0)];
        let graph = WeightedDigraph::from_edges(&edges, DuplicateEdgePolicy::default()).unwrap();
        let b = graph.node_id("b").unwrap();

        assert!(graph.neighbors(b).is_empty());
        assert_eq!(graph.source_count(), 1);
    }
}
