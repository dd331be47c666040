//! Dataset integrity anchor service.
//!
//! Loads a CSV dataset, computes a deterministic SHA-256 digest of its
//! cleaned form, and anchors/verifies that digest through a registry
//! contract on a public test network. Results are served through a
//! small web dashboard and JSON API.

use std::path::Path;

use tokio::net::TcpListener;

use integrity_anchor::config::{load_config, AppConfig};
use integrity_anchor::dataset::{clean, load_csv};
use integrity_anchor::http::{ActiveDataset, HttpServer};
use integrity_anchor::integrity::digest_dataset;
use integrity_anchor::lifecycle::{signals, Shutdown};
use integrity_anchor::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("integrity-anchor v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        dataset_label = %config.dataset.label,
        blockchain_enabled = config.blockchain.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone()).await?;

    // Load the configured dataset, if any, so the service is usable
    // without an upload.
    if let Some(path) = &config.dataset.path {
        let raw = load_csv(Path::new(path))?;
        let (dataset, cleaning) = clean(&raw, &config.dataset.cleaning)?;
        let digest = digest_dataset(&dataset);
        metrics::record_digest();
        tracing::info!(
            path = %path,
            rows = dataset.row_count(),
            digest = %digest,
            "Startup dataset loaded"
        );
        *server.state().active.write().await = Some(ActiveDataset {
            label: config.dataset.label.clone(),
            dataset,
            digest,
            cleaning,
        });
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::install(shutdown.clone());

    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
