//! Expansion of a shortest path with directly contiguous segments
//!
//! A segment is contiguous with another when its start coordinate equals
//! the other's end coordinate exactly. Such segments are folded into the
//! path depth-first, nearest first, the moment their predecessor is
//! appended. The end segment is only ever appended by the walk over the
//! shortest path, so it stays last and no shortest-path segment is lost.

use hashbrown::HashSet;
use itertools::Itertools;

use crate::{Error, SegmentCatalog, WeightedDigraph};

/// Pending successors of one appended segment
struct Frame<'a> {
    successors: Vec<&'a str>,
    next: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct PathExpander<'a> {
    graph: &'a WeightedDigraph,
    catalog: &'a SegmentCatalog,
}

impl<'a> PathExpander<'a> {
    pub fn new(graph: &'a WeightedDigraph, catalog: &'a SegmentCatalog) -> Self {
        Self { graph, catalog }
    }

    /// Walks `raw` in order, appending every segment not yet on the path and
    /// expanding each appended segment before moving on. Stops once the walk
    /// reaches `end`; nested expansion never appends `end` itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRecord`] or [`Error::MalformedNumericField`]
    /// when a segment's coordinates cannot be compared.
    pub fn expand(&self, raw: &[String], end: &str) -> Result<Vec<String>, Error> {
        let mut complete = Vec::with_capacity(raw.len());
        let mut visited: HashSet<String> = HashSet::with_capacity(raw.len());

        for tmc in raw {
            if visited.contains(tmc.as_str()) {
                continue;
            }
            visited.insert(tmc.clone());
            complete.push(tmc.clone());
            if tmc == end {
                break;
            }
            self.expand_from(tmc, end, &mut complete, &mut visited)?;
        }

        Ok(complete)
    }

    /// Depth-first expansion below `root` with an explicit stack, skipping
    /// `end`
    fn expand_from(
        &self,
        root: &str,
        end: &str,
        complete: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) -> Result<(), Error> {
        let mut stack = vec![Frame {
            successors: self.contiguous_successors(root)?,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&tmc) = frame.successors.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            if tmc == end || visited.contains(tmc) {
                continue;
            }
            visited.insert(tmc.to_string());
            complete.push(tmc.to_string());

            stack.push(Frame {
                successors: self.contiguous_successors(tmc)?,
                next: 0,
            });
        }

        Ok(())
    }

    /// Outgoing neighbors of `tmc` starting exactly where it ends, by
    /// ascending edge weight (ties keep adjacency order)
    fn contiguous_successors(&self, tmc: &str) -> Result<Vec<&'a str>, Error> {
        let Some(node) = self.graph.node_id(tmc) else {
            return Ok(Vec::new());
        };
        let neighbors = self.graph.neighbors(node);
        if neighbors.is_empty() {
            return Ok(Vec::new());
        }

        let end = self.catalog.record(tmc)?.end_point()?;
        let mut successors = Vec::new();
        for &(neighbor, _) in neighbors.iter().sorted_by(|a, b| a.1.total_cmp(&b.1)) {
            let neighbor_tmc = self.graph.tmc(neighbor);
            if self.catalog.record(neighbor_tmc)?.start_point()? == end {
                successors.push(neighbor_tmc);
            }
        }
        Ok(successors)
    }
}

/// Convenience wrapper around [`PathExpander::expand`]
pub fn expand_path(
    raw: &[String],
    end: &str,
    graph: &WeightedDigraph,
    catalog: &SegmentCatalog,
) -> Result<Vec<String>, Error> {
    PathExpander::new(graph, catalog).expand(raw, end)
}
