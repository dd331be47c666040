//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics)
//! - Initialize the blockchain client and registry when enabled
//! - Serve with graceful shutdown

use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use axum::http::HeaderValue;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::contract::HashRegistry;
use crate::blockchain::types::BlockchainResult;
use crate::blockchain::wallet::Wallet;
use crate::config::schema::AppConfig;
use crate::dataset::clean::CleaningReport;
use crate::dataset::types::Dataset;
use crate::http::{dashboard, handlers};
use crate::integrity::digest::DatasetDigest;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// The dataset currently held by the service.
pub struct ActiveDataset {
    pub label: String,
    pub dataset: Dataset,
    pub digest: DatasetDigest,
    pub cleaning: CleaningReport,
}

/// Blockchain handles, present only when integration is enabled.
#[derive(Clone)]
pub struct ChainState {
    pub client: BlockchainClient,
    pub registry: Arc<HashRegistry>,
    /// Absent when ANCHOR_PRIVATE_KEY is not set; the service then
    /// runs verify-only.
    pub wallet: Option<Arc<Wallet>>,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub active: Arc<RwLock<Option<ActiveDataset>>>,
    pub chain: Option<ChainState>,
}

/// HTTP server for the integrity anchor service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Connects the blockchain client when enabled. A missing wallet
    /// key downgrades to verify-only mode rather than failing startup.
    pub async fn new(config: AppConfig) -> BlockchainResult<Self> {
        let chain = if config.blockchain.enabled {
            let client = BlockchainClient::new(config.blockchain.clone()).await?;
            let registry = Arc::new(HashRegistry::new(client.clone(), &config.contract)?);
            let wallet = match Wallet::from_env(config.blockchain.chain_id) {
                Ok(w) => Some(Arc::new(w)),
                Err(e) => {
                    tracing::warn!(error = %e, "No wallet available, anchoring disabled");
                    None
                }
            };
            Some(ChainState {
                client,
                registry,
                wallet,
            })
        } else {
            tracing::info!("Blockchain integration disabled");
            None
        };

        let state = AppState {
            config: Arc::new(config.clone()),
            active: Arc::new(RwLock::new(None)),
            chain,
        };

        let router = build_router(&config, state.clone());
        Ok(Self { router, state })
    }

    /// Application state (startup dataset preload, tests).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The composed router (integration tests drive it directly).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut rx = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/api/health", get(handlers::health))
        .route("/api/dataset", post(handlers::upload_dataset))
        .route("/api/digest", get(handlers::get_digest))
        .route("/api/anchor", post(handlers::anchor))
        .route("/api/verify", get(handlers::verify))
        .route("/api/eda", get(handlers::eda))
        .route("/api/tamper-demo", post(handlers::tamper_demo))
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
        .layer(TraceLayer::new_for_http())
}

/// Generate a UUID v4 request id for every incoming request.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Record request count and latency for every endpoint.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    metrics::record_api_request(&path, response.status().as_u16(), start);
    response
}
