//! Hash registry contract bindings.
//!
//! The registry is a minimal contract with two functions: `storeHash`
//! writes a digest under a dataset label, `getHash` reads it back. An
//! unset label returns the empty string (Solidity default).

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::TxBuilder;
use crate::blockchain::types::{
    AnchorReceipt, BlockchainError, BlockchainResult, ConfirmationStatus,
};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::ContractConfig;
use crate::observability::metrics;

sol! {
    /// Store a digest under a dataset label.
    function storeHash(string datasetName, string hashValue);

    /// Read the digest stored under a dataset label.
    function getHash(string datasetName) returns (string);
}

/// Client for the on-chain digest registry.
#[derive(Debug, Clone)]
pub struct HashRegistry {
    client: BlockchainClient,
    address: Address,
    anchor_gas_limit: u64,
    anchor_timeout_secs: u64,
}

impl HashRegistry {
    /// Create a registry client for the configured contract.
    pub fn new(client: BlockchainClient, config: &ContractConfig) -> BlockchainResult<Self> {
        let address: Address = config
            .address
            .parse()
            .map_err(|e| BlockchainError::ContractAddress(format!("{}: {}", config.address, e)))?;

        Ok(Self {
            client,
            address,
            anchor_gas_limit: config.anchor_gas_limit,
            anchor_timeout_secs: config.anchor_timeout_secs,
        })
    }

    /// Read the digest anchored under `label`. Empty string means the
    /// label was never anchored.
    pub async fn get_hash(&self, label: &str) -> BlockchainResult<String> {
        let call = getHashCall {
            datasetName: label.to_string(),
        };
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(Bytes::from(call.abi_encode()));

        let output = self.client.call(tx).await?;
        getHashCall::abi_decode_returns(&output)
            .map_err(|e| BlockchainError::Abi(format!("getHash return: {}", e)))
    }

    /// Anchor a digest under `label`: build, sign, broadcast, and wait
    /// for the configured confirmation depth.
    pub async fn store_hash(
        &self,
        wallet: &Wallet,
        label: &str,
        digest_hex: &str,
    ) -> BlockchainResult<AnchorReceipt> {
        let call = storeHashCall {
            datasetName: label.to_string(),
            hashValue: digest_hex.to_string(),
        };

        let builder = TxBuilder::new(self.client.clone(), wallet.clone());
        let tx = builder
            .build(
                self.address,
                Bytes::from(call.abi_encode()),
                self.anchor_gas_limit,
            )
            .await?;

        let tx_hash = builder.send(tx).await?;
        tracing::info!(label, tx_hash = %tx_hash, "Anchor transaction broadcast");

        let status = builder
            .wait_for_confirmation(tx_hash, self.anchor_timeout_secs)
            .await;

        match status {
            Ok(ConfirmationStatus::Confirmed { block_number }) => {
                metrics::record_anchor(true);
                tracing::info!(
                    label,
                    tx_hash = %tx_hash,
                    block_number,
                    "Digest anchored"
                );
                Ok(AnchorReceipt {
                    label: label.to_string(),
                    digest_hex: digest_hex.to_string(),
                    tx_hash: tx_hash.to_string(),
                    block_number,
                    confirmations: self.client.confirmation_blocks(),
                })
            }
            Ok(ConfirmationStatus::Failed(reason)) => {
                metrics::record_anchor(false);
                Err(BlockchainError::Reverted(reason))
            }
            Ok(other) => {
                metrics::record_anchor(false);
                Err(BlockchainError::Rpc(format!(
                    "unexpected confirmation state: {:?}",
                    other
                )))
            }
            Err(e) => {
                metrics::record_anchor(false);
                Err(e)
            }
        }
    }

    /// The registry contract address.
    pub fn address(&self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_hash_encoding_roundtrip() {
        let call = storeHashCall {
            datasetName: "sales_data".to_string(),
            hashValue: "deadbeef".to_string(),
        };
        let encoded = call.abi_encode();
        // 4-byte selector plus ABI-encoded arguments
        assert_eq!(&encoded[..4], storeHashCall::SELECTOR);

        let decoded = storeHashCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.datasetName, "sales_data");
        assert_eq!(decoded.hashValue, "deadbeef");
    }

    #[test]
    fn test_get_hash_return_decoding() {
        let encoded = getHashCall::abi_encode_returns(&"abc123".to_string());
        let decoded = getHashCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(decoded, "abc123");
    }

    #[test]
    fn test_selectors_differ() {
        assert_ne!(storeHashCall::SELECTOR, getHashCall::SELECTOR);
    }
}
