use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("TMC not found in identification data: {0}")]
    MissingRecord(String),
    #[error("Malformed numeric field `{field}` for TMC {id}: {value:?}")]
    MalformedNumericField {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("No path found from {start} to {end}")]
    NoPathFound { start: String, end: String },
    #[error(
        "Ordering violation: settled node {node} at {settled} would improve to {candidate}"
    )]
    OrderingViolation {
        node: String,
        settled: f64,
        candidate: f64,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
