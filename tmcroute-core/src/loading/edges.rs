//! Edge file codec
//!
//! One row per admitted directed edge under the header
//! `start_node,end_node,distance,from_dir,to_dir`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::{Error, proximity::Edge};

/// Edge row as stored; the distance is parsed separately so a bad value is
/// reported as invalid data rather than a CSV error
#[derive(Debug, Deserialize)]
struct EdgeRow {
    start_node: String,
    end_node: String,
    distance: String,
    from_dir: Option<char>,
    to_dir: Option<char>,
}

/// Reads every edge row. Weights are parsed eagerly.
///
/// # Errors
///
/// Fails on malformed CSV, an unparseable distance, or a negative or NaN
/// distance.
pub fn read_edges<R: Read>(reader: R) -> Result<Vec<Edge>, Error> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut edges = Vec::new();

    for result in reader.deserialize() {
        let row: EdgeRow = result?;
        let weight = match row.distance.trim().parse::<f64>() {
            Ok(weight) if weight >= 0.0 => weight,
            _ => {
                return Err(Error::InvalidData(format!(
                    "edge {} -> {} has invalid distance {:?}",
                    row.start_node, row.end_node, row.distance
                )));
            }
        };
        edges.push(Edge {
            from: row.start_node,
            to: row.end_node,
            weight,
            from_dir: row.from_dir,
            to_dir: row.to_dir,
        });
    }

    Ok(edges)
}

pub fn read_edges_file(path: &Path) -> Result<Vec<Edge>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let edges = read_edges(file)?;
    info!("Read {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

/// Writes the header and one row per edge, in order
pub fn write_edges<W: Write>(writer: W, edges: &[Edge]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    if edges.is_empty() {
        writer.write_record(["start_node", "end_node", "distance", "from_dir", "to_dir"])?;
    }
    for edge in edges {
        writer.serialize(edge)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_edges_file(path: &Path, edges: &[Edge]) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        )
    })?;
    write_edges(file, edges)?;
    info!(
        "Successfully created the edges and saved them to the file {}",
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Edge> {
        vec![
            Edge {
                from: "119+05606".into(),
                to: "119+05607".into(),
                weight: 1.25,
                from_dir: Some('N'),
                to_dir: Some('E'),
            },
            Edge {
                from: "119+05607".into(),
                to: "119+05606".into(),
                weight: 0.0,
                from_dir: Some('E'),
                to_dir: None,
            },
        ]
    }

    #[test]
    fn writes_expected_layout() {
        let mut buffer = Vec::new();
        write_edges(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("start_node,end_node,distance,from_dir,to_dir"));
        assert_eq!(lines.next(), Some("119+05606,119+05607,1.25,N,E"));
        assert_eq!(lines.next(), Some("119+05607,119+05606,0.0,E,"));
    }

    #[test]
    fn first_data_row_is_kept() {
        let mut buffer = Vec::new();
        write_edges(&mut buffer, &sample()).unwrap();
        assert_eq!(read_edges(buffer.as_slice()).unwrap(), sample());
    }

    #[test]
    fn empty_edge_list_keeps_header() {
        let mut buffer = Vec::new();
        write_edges(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "start_node,end_node,distance,from_dir,to_dir\n"
        );
    }

    #[test]
    fn rejects_bad_distances() {
        let negative = "start_node,end_node,distance,from_dir,to_dir\na,b,-2,N,N\n";
        assert!(matches!(
            read_edges(negative.as_bytes()),
            Err(Error::InvalidData(_))
        ));

        let garbage = "start_node,end_node,distance,from_dir,to_dir\na,b,far,N,N\n";
        assert!(matches!(
            read_edges(garbage.as_bytes()),
            Err(Error::InvalidData(_))
        ));

        let not_a_number = "start_node,end_node,distance,from_dir,to_dir\na,b,NaN,N,N\n";
        assert!(matches!(
            read_edges(not_a_number.as_bytes()),
            Err(Error::InvalidData(_))
        ));
    }
}
