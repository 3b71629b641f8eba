use std::path::PathBuf;

use serde::Deserialize;

use crate::{Error, Kilometers, SegmentCatalog, model::DuplicateEdgePolicy, proximity::IndexMode};

/// Threshold on the start-to-start distance of an admitted edge
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum SeparationPolicy {
    /// Fixed distance in kilometers
    Fixed { km: Kilometers },
    /// Length of the longest segment in the catalog
    MaxSegmentLength,
}

impl Default for SeparationPolicy {
    fn default() -> Self {
        SeparationPolicy::Fixed { km: 50.0 }
    }
}

impl SeparationPolicy {
    /// Resolves the threshold for a catalog
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a negative or non-finite threshold,
    /// or when no segment length in the catalog parses.
    pub fn resolve(&self, catalog: &SegmentCatalog) -> Result<Kilometers, Error> {
        let km = match self {
            SeparationPolicy::Fixed { km } => *km,
            SeparationPolicy::MaxSegmentLength => catalog.max_length_km().ok_or_else(|| {
                Error::InvalidData("No parseable segment length in identification data".into())
            })?,
        };
        if !km.is_finite() || km < 0.0 {
            return Err(Error::InvalidData(format!(
                "Separation threshold must be a non-negative distance, got {km}"
            )));
        }
        Ok(km)
    }
}

/// Configuration of a routing run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Segment identification CSV
    pub identification_path: PathBuf,
    /// Edge CSV, written when `rebuild_edges` is set and read otherwise
    pub edge_path: PathBuf,
    pub rebuild_edges: bool,
    pub separation: SeparationPolicy,
    pub index: IndexMode,
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            identification_path: PathBuf::from("TMC_Identification.csv"),
            edge_path: PathBuf::from("network_edges.csv"),
            rebuild_edges: true,
            separation: SeparationPolicy::default(),
            index: IndexMode::default(),
            duplicate_edges: DuplicateEdgePolicy::default(),
        }
    }
}

impl RouteConfig {
    pub(super) fn validate(&self) -> Result<(), Error> {
        if !self.identification_path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!(
                    "Identification file not found: {}",
                    self.identification_path.display()
                ),
            )));
        }

        if !self.rebuild_edges && !self.edge_path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!(
                    "Edge file not found: {} (rebuild it first)",
                    self.edge_path.display()
                ),
            )));
        }

        if let SeparationPolicy::Fixed { km } = self.separation
            && (!km.is_finite() || km < 0.0)
        {
            return Err(Error::InvalidData(format!(
                "Separation threshold must be a non-negative distance, got {km}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::segment::tests::segment;

    #[test]
    fn fixed_threshold_defaults_to_fifty_km() {
        let catalog = SegmentCatalog::new();
        assert_eq!(SeparationPolicy::default().resolve(&catalog).unwrap(), 50.0);
    }

    #[test]
    fn threshold_from_longest_segment() {
        let mut record = segment("a", "N", (0.0, 0.0), (0.0, 0.0));
        record.miles = "10".to_string();
        let catalog: SegmentCatalog = [record].into_iter().collect();

        let km = SeparationPolicy::MaxSegmentLength.resolve(&catalog).unwrap();
        assert!((km - 16.09344).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_threshold() {
        let policy = SeparationPolicy::Fixed { km: -1.0 };
        assert!(policy.resolve(&SegmentCatalog::new()).is_err());
    }

    #[test]
    fn missing_identification_file() {
        let config = RouteConfig {
            identification_path: PathBuf::from("/nonexistent/TMC_Identification.csv"),
            ..RouteConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::IoError(_))));
    }
}
