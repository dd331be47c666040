//! API handlers for the dataset integrity flow.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::blockchain::types::AnchorReceipt;
use crate::dataset::clean::{clean, CleaningReport};
use crate::dataset::loader::read_csv;
use crate::dataset::stats::{profile, DatasetProfile};
use crate::http::response::ApiError;
use crate::http::server::{ActiveDataset, AppState, ChainState};
use crate::integrity::digest::{digest_dataset, DatasetDigest};
use crate::integrity::verify::{compare, tamper_check, TamperReport, VerificationReport};
use crate::observability::metrics;

/// How many rows the upload response previews.
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub label: String,
    pub row_count: usize,
    pub column_count: usize,
    pub headers: Vec<String>,
    pub preview: Vec<Vec<Option<String>>>,
    pub cleaning: CleaningReport,
    pub digest: DatasetDigest,
}

#[derive(Debug, Serialize)]
pub struct DigestResponse {
    pub label: String,
    pub digest: DatasetDigest,
    pub row_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub dataset_loaded: bool,
    /// "disabled", "healthy" or "unreachable".
    pub blockchain: &'static str,
}

/// Upload a CSV body, clean it, and make it the active dataset.
pub async fn upload_dataset(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    let raw = read_csv(body.as_ref())?;
    let (dataset, cleaning) = clean(&raw, &state.config.dataset.cleaning)?;
    let digest = digest_dataset(&dataset);
    metrics::record_digest();

    let label = state.config.dataset.label.clone();
    tracing::info!(
        label,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        digest = %digest,
        "Dataset loaded"
    );

    let response = UploadResponse {
        label: label.clone(),
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        headers: dataset.headers().to_vec(),
        preview: dataset.preview(PREVIEW_ROWS),
        cleaning: cleaning.clone(),
        digest: digest.clone(),
    };

    *state.active.write().await = Some(ActiveDataset {
        label,
        dataset,
        digest,
        cleaning,
    });

    Ok(Json(response))
}

/// Digest of the active dataset.
pub async fn get_digest(
    State(state): State<AppState>,
) -> Result<Json<DigestResponse>, ApiError> {
    let guard = state.active.read().await;
    let active = guard.as_ref().ok_or(ApiError::NoDataset)?;
    Ok(Json(DigestResponse {
        label: active.label.clone(),
        digest: active.digest.clone(),
        row_count: active.dataset.row_count(),
    }))
}

/// Anchor the active digest on-chain.
pub async fn anchor(
    State(state): State<AppState>,
) -> Result<Json<AnchorReceipt>, ApiError> {
    let guard = state.active.read().await;
    let active = guard.as_ref().ok_or(ApiError::NoDataset)?;
    let chain = chain_state(&state)?;
    let wallet = chain.wallet.as_ref().ok_or(ApiError::WalletUnavailable)?;

    let receipt = chain
        .registry
        .store_hash(wallet, &active.label, &active.digest.hex)
        .await?;
    Ok(Json(receipt))
}

/// Recompute the digest and compare it against the anchored value.
pub async fn verify(
    State(state): State<AppState>,
) -> Result<Json<VerificationReport>, ApiError> {
    let report = verification(&state).await?;
    Ok(Json(report))
}

/// Descriptive statistics, only for a currently verified dataset.
pub async fn eda(State(state): State<AppState>) -> Result<Json<DatasetProfile>, ApiError> {
    let report = verification(&state).await?;
    if !report.verified {
        return Err(ApiError::Tampered(Box::new(report)));
    }

    let guard = state.active.read().await;
    let active = guard.as_ref().ok_or(ApiError::NoDataset)?;
    Ok(Json(profile(&active.dataset)))
}

/// Demonstrate that a one-cell change breaks verification.
pub async fn tamper_demo(
    State(state): State<AppState>,
) -> Result<Json<TamperReport>, ApiError> {
    let guard = state.active.read().await;
    let active = guard.as_ref().ok_or(ApiError::NoDataset)?;
    let report = tamper_check(&active.dataset)?;
    Ok(Json(report))
}

/// Liveness plus blockchain reachability.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let dataset_loaded = state.active.read().await.is_some();
    let blockchain = match &state.chain {
        None => "disabled",
        Some(chain) => {
            if chain.client.is_healthy().await {
                "healthy"
            } else {
                "unreachable"
            }
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        dataset_loaded,
        blockchain,
    })
}

fn chain_state(state: &AppState) -> Result<&ChainState, ApiError> {
    state.chain.as_ref().ok_or(ApiError::BlockchainDisabled)
}

/// Shared verify path: fetch the anchored digest and compare.
async fn verification(state: &AppState) -> Result<VerificationReport, ApiError> {
    let guard = state.active.read().await;
    let active = guard.as_ref().ok_or(ApiError::NoDataset)?;
    let chain = chain_state(state)?;

    let onchain = chain.registry.get_hash(&active.label).await?;
    if onchain.is_empty() {
        return Err(ApiError::NotAnchored(active.label.clone()));
    }

    let report = compare(&active.label, &active.digest, &onchain);
    if report.verified {
        tracing::info!(label = %active.label, "Dataset verified against anchored digest");
    } else {
        tracing::warn!(
            label = %active.label,
            local = %report.local_hex,
            onchain = %report.onchain_hex,
            "Digest mismatch, dataset may have been tampered with"
        );
    }
    Ok(report)
}
