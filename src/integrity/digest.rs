//! Dataset digest computation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dataset::canonical::canonical_bytes;
use crate::dataset::types::Dataset;

/// Algorithm label carried alongside every digest.
pub const DIGEST_ALGORITHM: &str = "sha-256";

/// A fixed-size fingerprint of a cleaned dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDigest {
    /// Algorithm identifier (always "sha-256" today).
    pub algorithm: String,
    /// Lowercase hex of the 32-byte digest.
    pub hex: String,
}

impl DatasetDigest {
    /// Compare against another hex string, ignoring case and an
    /// optional 0x prefix (on-chain values are stored as plain text).
    pub fn matches_hex(&self, other: &str) -> bool {
        let other = other.strip_prefix("0x").unwrap_or(other);
        self.hex.eq_ignore_ascii_case(other)
    }
}

impl std::fmt::Display for DatasetDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)
    }
}

/// Digest raw bytes.
pub fn digest_bytes(bytes: &[u8]) -> DatasetDigest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    DatasetDigest {
        algorithm: DIGEST_ALGORITHM.to_string(),
        hex: hex::encode(hasher.finalize()),
    }
}

/// Digest a dataset through its canonical serialization.
pub fn digest_dataset(dataset: &Dataset) -> DatasetDigest {
    digest_bytes(&canonical_bytes(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::read_csv;

    #[test]
    fn test_digest_is_deterministic() {
        let ds = read_csv("name,qty\nwidget,10\n".as_bytes()).unwrap();
        assert_eq!(digest_dataset(&ds), digest_dataset(&ds));
    }

    #[test]
    fn test_digest_ignores_row_and_column_order() {
        let a = read_csv("name,qty\nwidget,10\ngadget,3\n".as_bytes()).unwrap();
        let b = read_csv("qty,name\n3,gadget\n10,widget\n".as_bytes()).unwrap();
        assert_eq!(digest_dataset(&a).hex, digest_dataset(&b).hex);
    }

    #[test]
    fn test_digest_changes_on_any_cell() {
        let a = read_csv("name,qty\nwidget,10\n".as_bytes()).unwrap();
        let b = read_csv("name,qty\nwidget,10.0\n".as_bytes()).unwrap();
        assert_ne!(digest_dataset(&a).hex, digest_dataset(&b).hex);
    }

    #[test]
    fn test_known_vector() {
        // SHA-256 of the empty string
        let d = digest_bytes(b"");
        assert_eq!(
            d.hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(d.algorithm, "sha-256");
        assert_eq!(d.hex.len(), 64);
    }

    #[test]
    fn test_matches_hex_case_and_prefix() {
        let d = digest_bytes(b"abc");
        let upper = d.hex.to_uppercase();
        assert!(d.matches_hex(&upper));
        assert!(d.matches_hex(&format!("0x{}", d.hex)));
        assert!(!d.matches_hex("deadbeef"));
    }
}
