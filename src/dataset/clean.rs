//! Dataset cleaning.
//!
//! Applies the configured cleaning steps and reports what changed, so
//! the dashboard can show exactly how the hashed dataset differs from
//! the uploaded file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::schema::CleaningConfig;
use crate::dataset::types::{Dataset, DatasetError};

/// Summary of the cleaning pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows before cleaning.
    pub rows_in: usize,
    /// Rows after cleaning.
    pub rows_out: usize,
    /// Rows dropped because every cell was missing.
    pub empty_rows_dropped: usize,
    /// Exact duplicate rows dropped (only when enabled).
    pub duplicate_rows_dropped: usize,
    /// Cells whose surrounding whitespace was trimmed.
    pub cells_trimmed: usize,
}

/// Clean a dataset according to the configured flags.
pub fn clean(
    dataset: &Dataset,
    config: &CleaningConfig,
) -> Result<(Dataset, CleaningReport), DatasetError> {
    let mut report = CleaningReport {
        rows_in: dataset.row_count(),
        ..Default::default()
    };

    let headers: Vec<String> = dataset
        .headers()
        .iter()
        .map(|h| {
            if config.trim_whitespace {
                h.trim().to_string()
            } else {
                h.clone()
            }
        })
        .collect();

    let mut rows: Vec<Vec<Option<String>>> = Vec::with_capacity(dataset.row_count());
    for row in dataset.rows() {
        let cleaned: Vec<Option<String>> = row
            .iter()
            .map(|cell| match cell {
                Some(text) if config.trim_whitespace => {
                    let trimmed = text.trim();
                    if trimmed.len() != text.len() {
                        report.cells_trimmed += 1;
                    }
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                }
                other => other.clone(),
            })
            .collect();

        if config.drop_empty_rows && cleaned.iter().all(|c| c.is_none()) {
            report.empty_rows_dropped += 1;
            continue;
        }
        rows.push(cleaned);
    }

    if config.drop_duplicate_rows {
        let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(rows.len());
        let before = rows.len();
        rows.retain(|row| seen.insert(row.clone()));
        report.duplicate_rows_dropped = before - rows.len();
    }

    report.rows_out = rows.len();
    let cleaned = Dataset::new(headers, rows)?;
    Ok((cleaned, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::read_csv;

    fn default_config() -> CleaningConfig {
        CleaningConfig::default()
    }

    #[test]
    fn test_trims_cells_and_headers() {
        let ds = read_csv(" name , qty \n widget ,10\n".as_bytes()).unwrap();
        let (cleaned, report) = clean(&ds, &default_config()).unwrap();
        assert_eq!(cleaned.headers(), &["name", "qty"]);
        assert_eq!(cleaned.cell(0, 0), Some("widget"));
        assert_eq!(report.cells_trimmed, 1);
    }

    #[test]
    fn test_drops_empty_rows() {
        let ds = read_csv("a,b\n1,2\n,\n3,4\n".as_bytes()).unwrap();
        let (cleaned, report) = clean(&ds, &default_config()).unwrap();
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(report.empty_rows_dropped, 1);
        assert_eq!(report.rows_in, 3);
        assert_eq!(report.rows_out, 2);
    }

    #[test]
    fn test_whitespace_only_cell_becomes_missing() {
        let ds = read_csv("a,b\n1,   \n".as_bytes()).unwrap();
        let (cleaned, _) = clean(&ds, &default_config()).unwrap();
        assert_eq!(cleaned.cell(0, 1), None);
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let ds = read_csv("a,b\n1,2\n1,2\n".as_bytes()).unwrap();
        let (cleaned, report) = clean(&ds, &default_config()).unwrap();
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(report.duplicate_rows_dropped, 0);
    }

    #[test]
    fn test_duplicates_dropped_when_enabled() {
        let config = CleaningConfig {
            drop_duplicate_rows: true,
            ..Default::default()
        };
        let ds = read_csv("a,b\n1,2\n3,4\n1,2\n".as_bytes()).unwrap();
        let (cleaned, report) = clean(&ds, &config).unwrap();
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(report.duplicate_rows_dropped, 1);
        // First occurrence survives
        assert_eq!(cleaned.cell(0, 0), Some("1"));
    }
}
