//! Digest verification and the tamper demonstration.

use serde::{Deserialize, Serialize};

use crate::dataset::types::{parse_numeric, ColumnKind, Dataset, DatasetError};
use crate::integrity::digest::{digest_dataset, DatasetDigest};

/// Outcome of comparing a local digest against the anchored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Label the digest was anchored under.
    pub label: String,
    /// Digest recomputed from the active dataset.
    pub local_hex: String,
    /// Digest fetched from the registry contract.
    pub onchain_hex: String,
    /// True when both digests match; false means the dataset was
    /// modified after anchoring.
    pub verified: bool,
}

/// Compare a local digest against the on-chain value.
pub fn compare(label: &str, local: &DatasetDigest, onchain: &str) -> VerificationReport {
    VerificationReport {
        label: label.to_string(),
        local_hex: local.hex.clone(),
        onchain_hex: onchain.to_string(),
        verified: local.matches_hex(onchain),
    }
}

/// Result of the tamper demonstration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TamperReport {
    /// Digest of the dataset as-is.
    pub original_hex: String,
    /// Digest after nudging one numeric cell by 1.
    pub tampered_hex: String,
    /// Column whose cell was altered.
    pub column: String,
    /// Row index (0-based, pre-canonicalization order) that was altered.
    pub row: usize,
    /// Always true for a working hash function.
    pub digest_changed: bool,
}

/// Demonstrate tamper sensitivity: add 1 to the first numeric cell and
/// show that the digest no longer matches.
pub fn tamper_check(dataset: &Dataset) -> Result<TamperReport, DatasetError> {
    let kinds = dataset.column_kinds();
    let column = kinds
        .iter()
        .position(|k| *k == ColumnKind::Numeric)
        .ok_or(DatasetError::NoNumericColumn)?;

    let row = dataset
        .rows()
        .iter()
        .position(|r| r[column].is_some())
        .ok_or(DatasetError::NoNumericColumn)?;

    // Unwraps guarded by the positions found above
    let cell = dataset.cell(row, column).expect("cell present");
    let value = parse_numeric(cell).expect("numeric column");

    let mut rows: Vec<Vec<Option<String>>> = dataset.rows().to_vec();
    rows[row][column] = Some(format_tampered(value + 1.0));
    let tampered = Dataset::new(dataset.headers().to_vec(), rows)?;

    let original = digest_dataset(dataset);
    let altered = digest_dataset(&tampered);
    let digest_changed = original.hex != altered.hex;

    Ok(TamperReport {
        original_hex: original.hex,
        tampered_hex: altered.hex,
        column: dataset.headers()[column].clone(),
        row,
        digest_changed,
    })
}

/// Format a tampered value without introducing a spurious ".0" on
/// integer cells.
fn format_tampered(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
