//! Segment identification records and their catalog

use geo::Point;
use hashbrown::HashMap;

use crate::{Error, KM_PER_MILE, Kilometers};

/// A single directional road segment as read from the identification file.
///
/// Numeric fields are kept as raw text and parsed on demand, so a malformed
/// coordinate only fails the operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRecord {
    pub tmc: String,
    pub road: String,
    pub direction: String,
    pub intersection: String,
    pub start_latitude: String,
    pub start_longitude: String,
    pub end_latitude: String,
    pub end_longitude: String,
    pub miles: String,
}

impl SegmentRecord {
    /// First character of the direction code, the only part compared
    pub fn heading(&self) -> Option<char> {
        self.direction.chars().next()
    }

    /// Start coordinate as `Point(lon, lat)`
    pub fn start_point(&self) -> Result<Point<f64>, Error> {
        Ok(Point::new(
            self.numeric("start_longitude", &self.start_longitude)?,
            self.numeric("start_latitude", &self.start_latitude)?,
        ))
    }

    /// End coordinate as `Point(lon, lat)`
    pub fn end_point(&self) -> Result<Point<f64>, Error> {
        Ok(Point::new(
            self.numeric("end_longitude", &self.end_longitude)?,
            self.numeric("end_latitude", &self.end_latitude)?,
        ))
    }

    /// Segment length converted from miles
    pub fn length_km(&self) -> Result<Kilometers, Error> {
        Ok(self.numeric("miles", &self.miles)? * KM_PER_MILE)
    }

    fn numeric(&self, field: &'static str, value: &str) -> Result<f64, Error> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::MalformedNumericField {
                id: self.tmc.clone(),
                field,
                value: value.to_string(),
            })
    }
}

/// Segment records indexed by TMC, iterated in load order
#[derive(Debug, Clone, Default)]
pub struct SegmentCatalog {
    records: Vec<SegmentRecord>,
    index: HashMap<String, usize>,
}

impl SegmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record. A repeated TMC replaces the earlier record but keeps
    /// its position; the replaced record is returned.
    pub fn insert(&mut self, record: SegmentRecord) -> Option<SegmentRecord> {
        if let Some(&pos) = self.index.get(&record.tmc) {
            return Some(std::mem::replace(&mut self.records[pos], record));
        }
        self.index.insert(record.tmc.clone(), self.records.len());
        self.records.push(record);
        None
    }

    pub fn get(&self, tmc: &str) -> Option<&SegmentRecord> {
        self.index.get(tmc).map(|&pos| &self.records[pos])
    }

    /// Like [`get`](Self::get), failing with [`Error::MissingRecord`]
    pub fn record(&self, tmc: &str) -> Result<&SegmentRecord, Error> {
        self.get(tmc)
            .ok_or_else(|| Error::MissingRecord(tmc.to_string()))
    }

    pub fn contains(&self, tmc: &str) -> bool {
        self.index.contains_key(tmc)
    }

    pub fn records(&self) -> &[SegmentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &SegmentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Longest segment in the catalog. Records with an unparseable length
    /// are ignored; `None` when no length parses.
    pub fn max_length_km(&self) -> Option<Kilometers> {
        self.records
            .iter()
            .filter_map(|record| record.length_km().ok())
            .filter(|km| km.is_finite())
            .reduce(f64::max)
    }
}

impl FromIterator<SegmentRecord> for SegmentCatalog {
    fn from_iter<I: IntoIterator<Item = SegmentRecord>>(iter: I) -> Self {
        let mut catalog = SegmentCatalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}
