//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (private key) + config (RPC URL, contract)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (build, sign, broadcast, confirm)
//!     → contract.rs (storeHash / getHash registry bindings)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when the chain is unreachable

pub mod client;
pub mod contract;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use contract::HashRegistry;
pub use types::{AnchorReceipt, BlockchainConfig, BlockchainError, ChainId};
pub use wallet::Wallet;
