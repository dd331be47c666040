//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the integrity anchor service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings (bind address, body limits).
    pub server: ServerConfig,

    /// Dataset settings (label, optional startup path, cleaning).
    pub dataset: DatasetConfig,

    /// Blockchain RPC settings.
    pub blockchain: BlockchainConfig,

    /// Hash registry contract settings.
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes (CSV uploads).
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_body_bytes: 16 * 1024 * 1024, // 16MB
            request_timeout_secs: 30,
        }
    }
}

/// Dataset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Label under which the digest is anchored on-chain.
    pub label: String,

    /// Optional CSV to load at startup as the active dataset.
    pub path: Option<String>,

    /// Cleaning behavior applied before hashing.
    pub cleaning: CleaningConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            label: "sales_data".to_string(),
            path: None,
            cleaning: CleaningConfig::default(),
        }
    }
}

/// Cleaning flags applied to every loaded dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Trim surrounding whitespace from headers and cells.
    pub trim_whitespace: bool,

    /// Drop rows whose cells are all missing.
    pub drop_empty_rows: bool,

    /// Drop exact duplicate rows. Off by default: dropping changes the
    /// digest of datasets that contain legitimate repeated records.
    pub drop_duplicate_rows: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            drop_empty_rows: true,
            drop_duplicate_rows: false,
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// Enable blockchain integration. When disabled, anchor/verify
    /// endpoints report the ledger as unavailable.
    pub enabled: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (11155111 for the Sepolia test network).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before an anchor is
    /// considered final.
    pub confirmation_blocks: u32,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 11_155_111,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

/// Hash registry contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the deployed registry contract.
    pub address: String,

    /// Gas limit for `storeHash` transactions.
    pub anchor_gas_limit: u64,

    /// Maximum time to wait for anchor confirmation in seconds.
    pub anchor_timeout_secs: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            anchor_gas_limit: 200_000,
            anchor_timeout_secs: 120,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
