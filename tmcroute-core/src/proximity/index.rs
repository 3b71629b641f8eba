//! Spatial pre-filter for the proximity pass
//!
//! Start coordinates are placed on the unit sphere so that a great-circle
//! radius maps to a fixed chord length, which the R-tree can query directly.
//! Results are a superset of the admissible pairs; the exact predicate is
//! still applied to each candidate.

use geo::Point;
use rstar::{RTree, primitives::GeomWithData};

use super::EARTH_DIAMETER_KM;
use crate::Kilometers;

type SpherePoint = GeomWithData<[f64; 3], usize>;

/// Slack on the squared chord so rounding never drops a boundary pair
const RELATIVE_SLACK: f64 = 1e-9;
const ABSOLUTE_SLACK: f64 = 1e-14;

pub(super) struct SphereIndex {
    tree: RTree<SpherePoint>,
}

impl SphereIndex {
    /// Indexes every present point under its position in `points`
    pub(super) fn new(points: &[Option<Point<f64>>]) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| point.map(|p| SpherePoint::new(unit_vector(p), i)))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Positions of all points within `radius` of `center`, ascending
    pub(super) fn within(&self, center: Point<f64>, radius: Kilometers) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .tree
            .locate_within_distance(unit_vector(center), squared_chord(radius))
            .map(|entry| entry.data)
            .collect();
        found.sort_unstable();
        found
    }
}

fn unit_vector(point: Point<f64>) -> [f64; 3] {
    let (lat, lon) = (point.y().to_radians(), point.x().to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Squared unit-sphere chord spanning a great-circle distance, with slack
fn squared_chord(radius: Kilometers) -> f64 {
    let angle = 2.0 * radius.max(0.0) / EARTH_DIAMETER_KM;
    if angle >= std::f64::consts::PI {
        return 4.0 + ABSOLUTE_SLACK;
    }
    let half_chord = (angle / 2.0).sin();
    4.0 * half_chord * half_chord * (1.0 + RELATIVE_SLACK) + ABSOLUTE_SLACK
}
