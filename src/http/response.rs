//! API error responses.
//!
//! Every failure at the HTTP boundary serializes to
//! `{"error": <stable code>, "message": <human text>}` with an
//! appropriate status code, so the dashboard and CLI can branch on the
//! code without parsing messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::blockchain::types::BlockchainError;
use crate::dataset::types::DatasetError;
use crate::integrity::verify::VerificationReport;

/// Errors surfaced by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No dataset has been uploaded or loaded yet.
    #[error("no active dataset; upload one first")]
    NoDataset,

    /// The configured label has no digest stored on-chain.
    #[error("dataset '{0}' has not been anchored")]
    NotAnchored(String),

    /// The local digest does not match the anchored value.
    #[error("dataset digest does not match the anchored value")]
    Tampered(Box<VerificationReport>),

    /// Blockchain integration is turned off in the configuration.
    #[error("blockchain integration is disabled")]
    BlockchainDisabled,

    /// No signing key available; anchoring is not possible.
    #[error("no wallet configured; set ANCHOR_PRIVATE_KEY")]
    WalletUnavailable,

    /// Dataset could not be parsed or transformed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Ledger interaction failed.
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

impl ApiError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoDataset => "no_dataset",
            ApiError::NotAnchored(_) => "not_anchored",
            ApiError::Tampered(_) => "tampered",
            ApiError::BlockchainDisabled => "blockchain_disabled",
            ApiError::WalletUnavailable => "wallet_unavailable",
            ApiError::Dataset(_) => "invalid_dataset",
            ApiError::Blockchain(_) => "rpc_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoDataset | ApiError::NotAnchored(_) => StatusCode::NOT_FOUND,
            ApiError::Tampered(_) => StatusCode::CONFLICT,
            ApiError::BlockchainDisabled | ApiError::WalletUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Dataset(_) => StatusCode::BAD_REQUEST,
            ApiError::Blockchain(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        if let ApiError::Tampered(report) = &self {
            body["report"] = serde_json::to_value(report.as_ref()).unwrap_or_default();
        }

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "API error");
        } else {
            tracing::debug!(code = self.code(), error = %self, "API error");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NoDataset.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BlockchainDisabled.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Blockchain(BlockchainError::Rpc("boom".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ApiError::NoDataset.code(), "no_dataset");
        assert_eq!(ApiError::WalletUnavailable.code(), "wallet_unavailable");
    }
}
