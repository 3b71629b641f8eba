//! Reading the segment identification table

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{info, warn};

use crate::{Error, SegmentCatalog, SegmentRecord};

/// Leading columns of the identification table, in file order. Any further
/// (administrative) columns are ignored.
pub const IDENTIFICATION_COLUMNS: [&str; 12] = [
    "tmc",
    "road",
    "direction",
    "intersection",
    "state",
    "county",
    "zip",
    "start_latitude",
    "start_longitude",
    "end_latitude",
    "end_longitude",
    "miles",
];

const TMC: usize = 0;
const ROAD: usize = 1;
const DIRECTION: usize = 2;
const INTERSECTION: usize = 3;
const START_LATITUDE: usize = 7;
const START_LONGITUDE: usize = 8;
const END_LATITUDE: usize = 9;
const END_LONGITUDE: usize = 10;
const MILES: usize = 11;

/// Reads identification rows by position. The first row is a header and is
/// skipped whatever its content.
///
/// # Errors
///
/// Fails on malformed CSV or a row lacking a required column. Numeric
/// columns are not validated here.
pub fn read_catalog<R: Read>(reader: R) -> Result<SegmentCatalog, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut catalog = SegmentCatalog::new();
    for (row, result) in reader.records().enumerate() {
        let record = segment_from_row(&result?, row + 2)?;
        if let Some(previous) = catalog.insert(record) {
            warn!(
                "TMC {} appears more than once; keeping the later row",
                previous.tmc
            );
        }
    }

    info!("Identified {} TMCs", catalog.len());
    Ok(catalog)
}

pub fn read_catalog_file(path: &Path) -> Result<SegmentCatalog, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    read_catalog(file)
}

fn segment_from_row(row: &StringRecord, line: usize) -> Result<SegmentRecord, Error> {
    let field = |index: usize| -> Result<String, Error> {
        row.get(index).map(str::to_string).ok_or_else(|| {
            Error::InvalidData(format!(
                "line {line}: missing column `{}`",
                IDENTIFICATION_COLUMNS[index]
            ))
        })
    };

    let tmc = field(TMC)?;
    if tmc.is_empty() {
        return Err(Error::InvalidData(format!("line {line}: empty TMC")));
    }

    Ok(SegmentRecord {
        tmc,
        road: field(ROAD)?,
        direction: field(DIRECTION)?,
        intersection: field(INTERSECTION)?,
        start_latitude: field(START_LATITUDE)?,
        start_longitude: field(START_LONGITUDE)?,
        end_latitude: field(END_LATITUDE)?,
        end_longitude: field(END_LONGITUDE)?,
        miles: field(MILES)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "tmc,road,direction,intersection,state,county,zip,start_latitude,\
                          start_longitude,end_latitude,end_longitude,miles,road_order\n";

    #[test]
    fn reads_rows_by_position() {
        let data = format!(
            "{HEADER}\
             119+05606,I-95,NORTHBOUND,EXIT 1,VA,FAIRFAX,22079,38.7,-77.2,38.71,-77.2,0.69,1\n\
             119P05607,I-95,NORTHBOUND,,VA,FAIRFAX,22079,38.71,-77.2,38.72,-77.2,0.7\n"
        );
        let catalog = read_catalog(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let first = catalog.get("119+05606").unwrap();
        assert_eq!(first.road, "I-95");
        assert_eq!(first.intersection, "EXIT 1");
        assert_eq!(first.end_latitude, "38.71");
        assert_eq!(catalog.records()[1].tmc, "119P05607");
    }

    #[test]
    fn numeric_columns_are_not_validated_at_load() {
        let data = format!("{HEADER}a,R,N,,,,,oops,-77,38,-77,1\n");
        let catalog = read_catalog(data.as_bytes()).unwrap();

        assert!(catalog.get("a").unwrap().start_point().is_err());
    }

    #[test]
    fn short_row_fails() {
        let data = format!("{HEADER}a,R,N,,,,,38,-77,38\n");
        let result = read_catalog(data.as_bytes());

        assert!(matches!(result, Err(Error::InvalidData(msg)) if msg.contains("end_longitude")));
    }

    #[test]
    fn header_only_is_empty() {
        let catalog = read_catalog(HEADER.as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }
}
