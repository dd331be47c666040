//! Tabular dataset subsystem.
//!
//! # Data Flow
//! ```text
//! CSV file / uploaded bytes
//!     → loader.rs (parse, header + width checks)
//!     → clean.rs (trim, drop empty/duplicate rows)
//!     → canonical.rs (order-independent serialization for hashing)
//!     → stats.rs (EDA summaries for the dashboard)
//! ```

pub mod canonical;
pub mod clean;
pub mod loader;
pub mod stats;
pub mod types;

pub use canonical::canonical_bytes;
pub use clean::{clean, CleaningReport};
pub use loader::{load_csv, read_csv};
pub use stats::{profile, DatasetProfile};
pub use types::{ColumnKind, Dataset, DatasetError};
