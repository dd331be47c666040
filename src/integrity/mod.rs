//! Integrity subsystem.
//!
//! # Data Flow
//! ```text
//! cleaned Dataset
//!     → digest.rs (canonical bytes → SHA-256)
//!     → verify.rs (compare local digest against the anchored value,
//!                  tamper demonstration)
//! ```

pub mod digest;
pub mod verify;

pub use digest::{digest_bytes, digest_dataset, DatasetDigest, DIGEST_ALGORITHM};
pub use verify::{compare, tamper_check, TamperReport, VerificationReport};
