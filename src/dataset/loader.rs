//! CSV loading.

use std::io::Read;
use std::path::Path;

use crate::dataset::types::{Dataset, DatasetError};

/// Load a dataset from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Read a dataset from any CSV source (file, uploaded request body).
///
/// The first record is the header row. Ragged rows are rejected by the
/// parser; cells are kept verbatim (cleaning happens separately).
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::Empty);
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    Dataset::new(headers, rows)
}
