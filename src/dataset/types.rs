//! Dataset types and error definitions.

use thiserror::Error;

/// Errors that can occur while loading or transforming datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse failure (malformed quoting, ragged rows).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file contained no header row.
    #[error("dataset is empty: no header row")]
    Empty,

    /// Two columns share the same name after trimming.
    #[error("duplicate column name '{0}'")]
    DuplicateHeader(String),

    /// A row's cell count does not match the header.
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Operation needs a numeric column and none exists.
    #[error("dataset has no numeric column")]
    NoNumericColumn,
}

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-missing cell parses as a finite f64.
    Numeric,
    /// Anything else.
    Text,
}

/// An in-memory tabular dataset.
///
/// Cells are kept as their original text; `None` marks a missing value.
/// Keeping the raw text (rather than parsed values) makes the canonical
/// serialization a pure function of the cleaned file content.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Dataset {
    /// Construct a dataset, checking header uniqueness and row widths.
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Result<Self, DatasetError> {
        if headers.is_empty() {
            return Err(DatasetError::Empty);
        }
        for (i, h) in headers.iter().enumerate() {
            if headers[..i].contains(h) {
                return Err(DatasetError::DuplicateHeader(h.clone()));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(DatasetError::RaggedRow {
                    row: i + 1,
                    expected: headers.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cell at (row, column), `None` if missing or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// Infer the kind of every column.
    ///
    /// A column is numeric when it has at least one non-missing cell and
    /// every non-missing cell parses as a finite number.
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        (0..self.headers.len())
            .map(|col| {
                let mut any = false;
                for row in &self.rows {
                    match &row[col] {
                        Some(cell) => {
                            any = true;
                            if parse_numeric(cell).is_none() {
                                return ColumnKind::Text;
                            }
                        }
                        None => {}
                    }
                }
                if any {
                    ColumnKind::Numeric
                } else {
                    ColumnKind::Text
                }
            })
            .collect()
    }

    /// First N rows for dashboard previews.
    pub fn preview(&self, limit: usize) -> Vec<Vec<Option<String>>> {
        self.rows.iter().take(limit).cloned().collect()
    }
}

/// Parse a cell as a finite number, rejecting NaN/infinity so they
/// cannot leak into sort keys or summaries.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}
