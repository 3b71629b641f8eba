use geo::line_string;
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde_json::json;

use super::Route;
use crate::{Error, SegmentCatalog};

impl Route {
    /// Converts the complete path to a `GeoJSON` `FeatureCollection` with one
    /// straight line per segment.
    pub fn to_geojson(&self, catalog: &SegmentCatalog) -> Result<FeatureCollection, Error> {
        let features = self
            .complete_path
            .iter()
            .enumerate()
            .map(|(position, tmc)| self.segment_feature(catalog, position, tmc))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, catalog: &SegmentCatalog) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(catalog)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    fn segment_feature(
        &self,
        catalog: &SegmentCatalog,
        position: usize,
        tmc: &str,
    ) -> Result<Feature, Error> {
        let record = catalog.record(tmc)?;
        let (start, end) = (record.start_point()?, record.end_point()?);
        let line = line_string![
            (x: start.x(), y: start.y()),
            (x: end.x(), y: end.y())
        ];
        let geometry = Geometry::new(GeometryValue::from(&line));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "tmc": record.tmc,
                "road": record.road,
                "direction": record.direction,
                "position": position,
                "on_shortest_path": self.shortest_path.iter().any(|id| id == tmc),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
