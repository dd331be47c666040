//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file on disk
//!     → loader.rs (read, parse)
//!     → validation.rs (semantic checks, all errors collected)
//!     → schema.rs types consumed by the rest of the service
//! ```
//!
//! The wallet private key is deliberately NOT part of the schema; it is
//! read from the environment by `blockchain::wallet`.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, BlockchainConfig, CleaningConfig, ContractConfig, DatasetConfig,
    ObservabilityConfig, ServerConfig,
};
