//! Configuration validation.
//!
//! Semantic validation on top of serde's syntactic checks. Returns all
//! violations, not just the first, so a bad config file can be fixed in
//! one pass.

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single configuration violation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("server.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("server.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("dataset.label must not be empty")]
    EmptyDatasetLabel,

    #[error("blockchain.rpc_url '{0}' is not a valid URL")]
    InvalidRpcUrl(String),

    #[error("blockchain.failover_urls[{index}] '{url}' is not a valid URL")]
    InvalidFailoverUrl { index: usize, url: String },

    #[error("blockchain.chain_id must not be zero")]
    ZeroChainId,

    #[error("blockchain.rpc_timeout_secs must be greater than zero")]
    ZeroRpcTimeout,

    #[error("blockchain.gas_price_multiplier must be at least 1.0, got {0}")]
    GasMultiplierTooLow(f64),

    #[error("blockchain.max_gas_price_gwei must be greater than zero")]
    ZeroMaxGasPrice,

    #[error("contract.address '{0}' is not a valid address")]
    InvalidContractAddress(String),

    #[error("contract.anchor_gas_limit must be greater than zero")]
    ZeroAnchorGasLimit,

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.dataset.label.trim().is_empty() {
        errors.push(ValidationError::EmptyDatasetLabel);
    }

    if config.blockchain.enabled {
        if config.blockchain.rpc_url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidRpcUrl(
                config.blockchain.rpc_url.clone(),
            ));
        }
        for (index, url) in config.blockchain.failover_urls.iter().enumerate() {
            if url.parse::<url::Url>().is_err() {
                errors.push(ValidationError::InvalidFailoverUrl {
                    index,
                    url: url.clone(),
                });
            }
        }
        if config.blockchain.chain_id == 0 {
            errors.push(ValidationError::ZeroChainId);
        }
        if config.blockchain.rpc_timeout_secs == 0 {
            errors.push(ValidationError::ZeroRpcTimeout);
        }
        if config.blockchain.gas_price_multiplier < 1.0 {
            errors.push(ValidationError::GasMultiplierTooLow(
                config.blockchain.gas_price_multiplier,
            ));
        }
        if config.blockchain.max_gas_price_gwei == 0 {
            errors.push(ValidationError::ZeroMaxGasPrice);
        }
        if config
            .contract
            .address
            .parse::<alloy::primitives::Address>()
            .is_err()
        {
            errors.push(ValidationError::InvalidContractAddress(
                config.contract.address.clone(),
            ));
        }
        if config.contract.anchor_gas_limit == 0 {
            errors.push(ValidationError::ZeroAnchorGasLimit);
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_multiple_errors() {
        let mut config = AppConfig::default();
        config.server.bind_address = "not-an-address".to_string();
        config.dataset.label = "  ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::EmptyDatasetLabel));
    }

    #[test]
    fn test_blockchain_checks_only_when_enabled() {
        let mut config = AppConfig::default();
        config.blockchain.rpc_url = "not a url".to_string();
        config.contract.address = "0xdeadbeef".to_string();
        // Disabled: invalid blockchain settings are ignored
        assert!(validate_config(&config).is_ok());

        config.blockchain.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidRpcUrl(_))));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidContractAddress(_))));
    }

    #[test]
    fn test_valid_blockchain_section() {
        let mut config = AppConfig::default();
        config.blockchain.enabled = true;
        config.blockchain.rpc_url = "https://rpc.sepolia.org".to_string();
        config.contract.address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
