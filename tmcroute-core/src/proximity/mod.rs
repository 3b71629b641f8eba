//! Inference of directed edges from segment proximity and direction
//!
//! Every ordered pair of distinct segments is a candidate edge. The edge
//! `i -> j` is admitted when the great-circle distance between the two start
//! coordinates is within the separation threshold and `j` does not head in
//! the opposite compass direction of `i`.

mod index;

use geo::Point;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Kilometers, SegmentCatalog, progress::Progress};
use index::SphereIndex;

/// Mean Earth diameter used by the distance approximation
pub const EARTH_DIAMETER_KM: f64 = 12742.0;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Admitted directed edge between two segments.
///
/// Field names on the wire follow the edge file header
/// `start_node,end_node,distance,from_dir,to_dir`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    #[serde(rename = "start_node")]
    pub from: String,
    #[serde(rename = "end_node")]
    pub to: String,
    #[serde(rename = "distance")]
    pub weight: Kilometers,
    pub from_dir: Option<char>,
    pub to_dir: Option<char>,
}

/// Candidate search strategy for the proximity pass.
///
/// Both strategies admit the identical edge set in the identical order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// R-tree over start coordinates on the unit sphere
    #[default]
    RTree,
    /// Evaluate every ordered pair
    BruteForce,
}

/// Great-circle distance between two `Point(lon, lat)` in kilometers
pub fn great_circle_distance(from: Point<f64>, to: Point<f64>) -> Kilometers {
    let (lat1, lon1) = (from.y(), from.x());
    let (lat2, lon2) = (to.y(), to.x());
    let a = 0.5 - ((lat2 - lat1) * DEG_TO_RAD).cos() / 2.0
        + (lat1 * DEG_TO_RAD).cos()
            * (lat2 * DEG_TO_RAD).cos()
            * (1.0 - ((lon2 - lon1) * DEG_TO_RAD).cos())
            / 2.0;
    // rounding can push `a` just outside [0, 1]
    EARTH_DIAMETER_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Heading that a segment with `heading` may never connect to
pub fn opposite(heading: char) -> Option<char> {
    match heading {
        'N' => Some('S'),
        'S' => Some('N'),
        'E' => Some('W'),
        'W' => Some('E'),
        _ => None,
    }
}

/// Direction half of the admission predicate
pub fn directions_compatible(from: Option<char>, to: Option<char>) -> bool {
    match (from.and_then(opposite), to) {
        (Some(forbidden), Some(to)) => forbidden != to,
        _ => true,
    }
}

/// Derives the edge list of a catalog.
///
/// Each run owns its state; nothing is shared between separate builds.
#[derive(Debug, Clone)]
pub struct ProximityGraphBuilder<'a> {
    catalog: &'a SegmentCatalog,
    max_separation: Kilometers,
    mode: IndexMode,
}

impl<'a> ProximityGraphBuilder<'a> {
    pub fn new(catalog: &'a SegmentCatalog, max_separation: Kilometers) -> Self {
        Self {
            catalog,
            max_separation,
            mode: IndexMode::default(),
        }
    }

    #[must_use]
    pub fn with_index_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_separation(&self) -> Kilometers {
        self.max_separation
    }

    /// Evaluates all `n²` ordered pairs and returns the admitted edges in
    /// catalog order of `(from, to)`.
    ///
    /// Pairs involving a segment whose start coordinate does not parse are
    /// skipped.
    pub fn build(&self, progress: &dyn Progress) -> Vec<Edge> {
        let records = self.catalog.records();
        let n = records.len();
        let starts: Vec<Option<Point<f64>>> =
            records.iter().map(|r| r.start_point().ok()).collect();

        let malformed = starts.iter().filter(|p| p.is_none()).count();
        if malformed > 0 {
            warn!(
                "{malformed} of {n} TMCs have malformed start coordinates; \
                 pairs involving them are skipped"
            );
        }

        info!(
            "Evaluating {} segment pairs (max separation {:.3} km, {:?})",
            n * n,
            self.max_separation,
            self.mode
        );
        progress.begin((n as u64).pow(2));

        let index = match self.mode {
            IndexMode::RTree => Some(SphereIndex::new(&starts)),
            IndexMode::BruteForce => None,
        };

        // one partition per source keeps the output order independent of scheduling
        let partitions: Vec<Vec<Edge>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let edges: Vec<Edge> = match &index {
                    Some(index) => match starts[i] {
                        Some(origin) => index
                            .within(origin, self.max_separation)
                            .into_iter()
                            .filter_map(|j| self.admit(i, j, &starts))
                            .collect(),
                        None => Vec::new(),
                    },
                    None => (0..n).filter_map(|j| self.admit(i, j, &starts)).collect(),
                };
                progress.advance(n as u64);
                edges
            })
            .collect();
        progress.finish();

        let edges: Vec<Edge> = partitions.into_iter().flatten().collect();
        info!("Admitted {} directed edges", edges.len());
        edges
    }

    fn admit(&self, i: usize, j: usize, starts: &[Option<Point<f64>>]) -> Option<Edge> {
        let records = self.catalog.records();
        let (from, to) = (&records[i], &records[j]);
        if i == j || from.tmc == to.tmc {
            return None;
        }
        let distance = great_circle_distance(starts[i]?, starts[j]?);
        let (from_dir, to_dir) = (from.heading(), to.heading());

        // NaN distances fail the comparison
        let admitted = distance <= self.max_separation && directions_compatible(from_dir, to_dir);
        if !admitted {
            return None;
        }
        Some(Edge {
            from: from.tmc.clone(),
            to: to.tmc.clone(),
            weight: distance,
            from_dir,
            to_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::segment::tests::segment;
    use crate::progress::NoProgress;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn grid_catalog() -> SegmentCatalog {
        let headings = ["NORTHBOUND", "SOUTHBOUND", "EASTBOUND", "WESTBOUND", "X"];
        (0..60)
            .map(|k| {
                let lat = 38.80 + f64::from(k % 8) * 0.013;
                let lon = -77.10 + f64::from(k / 8) * 0.017;
                segment(
                    &format!("110+{k:05}"),
                    headings[(k % 5) as usize],
                    (lat, lon),
                    (lat + 0.01, lon),
                )
            })
            .collect()
    }

    #[test]
    fn distance_matches_reference_values() {
        let washington = Point::new(-77.0369, 38.9072);
        let baltimore = Point::new(-76.6122, 39.2904);
        let d = great_circle_distance(washington, baltimore);
        assert!((d - 56.1).abs() < 0.5, "got {d}");
        assert_eq!(great_circle_distance(washington, washington), 0.0);
    }

    #[test]
    fn opposite_table_is_symmetric() {
        for heading in ['N', 'S', 'E', 'W'] {
            let other = opposite(heading).unwrap();
            assert_eq!(opposite(other), Some(heading));
        }
        assert_eq!(opposite('X'), None);
        assert!(directions_compatible(Some('N'), Some('E')));
        assert!(directions_compatible(None, Some('S')));
        assert!(!directions_compatible(Some('E'), Some('W')));
    }

    #[test]
    fn opposite_directions_never_connect() {
        let catalog: SegmentCatalog = [
            segment("a", "NORTHBOUND", (40.0, -75.0), (40.1, -75.0)),
            segment("b", "SOUTHBOUND", (40.0, -75.0), (39.9, -75.0)),
        ]
        .into_iter()
        .collect();

        let edges = ProximityGraphBuilder::new(&catalog, 50.0).build(&NoProgress);
        assert!(edges.is_empty());
    }

    #[test]
    fn self_loops_and_distant_pairs_are_excluded() {
        let catalog: SegmentCatalog = [
            segment("a", "N", (40.0, -75.0), (40.1, -75.0)),
            segment("b", "N", (40.01, -75.0), (40.1, -75.0)),
            segment("far", "N", (45.0, -75.0), (45.1, -75.0)),
        ]
        .into_iter()
        .collect();

        let edges = ProximityGraphBuilder::new(&catalog, 5.0).build(&NoProgress);
        let pairs: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();

        assert_eq!(pairs, [("a", "b"), ("b", "a")]);
        assert_eq!(edges[0].from_dir, Some('N'));
        assert!(edges.iter().all(|e| e.weight >= 0.0 && e.weight <= 5.0));
    }

    #[test]
    fn indexed_and_brute_force_agree() {
        let catalog = grid_catalog();
        for max in [0.0, 0.5, 1.5, 3.0, 50.0] {
            let indexed = ProximityGraphBuilder::new(&catalog, max)
                .with_index_mode(IndexMode::RTree)
                .build(&NoProgress);
            let brute = ProximityGraphBuilder::new(&catalog, max)
                .with_index_mode(IndexMode::BruteForce)
                .build(&NoProgress);
            assert_eq!(indexed, brute, "max separation {max}");
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let catalog = grid_catalog();
        let builder = ProximityGraphBuilder::new(&catalog, 2.0);
        assert_eq!(builder.build(&NoProgress), builder.build(&NoProgress));
    }

    #[test]
    fn admitted_edges_satisfy_predicate() {
        let catalog = grid_catalog();
        let edges = ProximityGraphBuilder::new(&catalog, 2.0).build(&NoProgress);
        assert!(!edges.is_empty());

        for edge in &edges {
            let from = catalog.get(&edge.from).unwrap();
            let to = catalog.get(&edge.to).unwrap();
            let distance =
                great_circle_distance(from.start_point().unwrap(), to.start_point().unwrap());
            assert_ne!(edge.from, edge.to);
            assert!(distance <= 2.0);
            assert!(directions_compatible(from.heading(), to.heading()));
        }
    }

    #[test]
    fn malformed_start_skips_only_its_pairs() {
        let mut broken = segment("broken", "N", (40.0, -75.0), (40.1, -75.0));
        broken.start_latitude = "??".to_string();
        let catalog: SegmentCatalog = [
            segment("a", "N", (40.0, -75.0), (40.1, -75.0)),
            broken,
            segment("b", "E", (40.0, -75.0), (40.0, -74.9)),
        ]
        .into_iter()
        .collect();

        let edges = ProximityGraphBuilder::new(&catalog, 1.0).build(&NoProgress);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.from != "broken" && e.to != "broken"));
    }

    #[derive(Default)]
    struct Counting {
        total: AtomicU64,
        done: AtomicU64,
    }

    impl Progress for Counting {
        fn begin(&self, total: u64) {
            self.total.store(total, Ordering::Relaxed);
        }

        fn advance(&self, units: u64) {
            self.done.fetch_add(units, Ordering::Relaxed);
        }
    }

    #[test]
    fn progress_covers_every_pair() {
        let catalog = grid_catalog();
        let progress = Counting::default();
        ProximityGraphBuilder::new(&catalog, 1.0).build(&progress);

        let n = catalog.len() as u64;
        assert_eq!(progress.total.load(Ordering::Relaxed), n * n);
        assert_eq!(progress.done.load(Ordering::Relaxed), n * n);
    }
}
