//! Integration tests for the HTTP API.
//!
//! These run with blockchain integration disabled: the dataset flow is
//! exercised end-to-end in-process, and ledger-dependent endpoints must
//! report the integration as unavailable.

mod common;

use common::{test_server, SALES_CSV};
use serde_json::Value;

#[tokio::test]
async fn test_dashboard_page() {
    let server = test_server().await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Dataset Integrity Anchor"));
}

#[tokio::test]
async fn test_health_reports_disabled_blockchain() {
    let server = test_server().await;

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["blockchain"], "disabled");
    assert_eq!(json["dataset_loaded"], false);
}

#[tokio::test]
async fn test_upload_and_digest_flow() {
    let server = test_server().await;

    let response = server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes(SALES_CSV.as_bytes().to_vec().into())
        .await;
    assert_eq!(response.status_code(), 200);
    let uploaded: Value = response.json();
    assert_eq!(uploaded["label"], "sales_data");
    assert_eq!(uploaded["row_count"], 3);
    assert_eq!(uploaded["column_count"], 4);
    assert_eq!(uploaded["digest"]["algorithm"], "sha-256");
    let digest = uploaded["digest"]["hex"].as_str().unwrap();
    assert_eq!(digest.len(), 64);
    assert_eq!(uploaded["preview"].as_array().unwrap().len(), 3);

    // Digest endpoint returns the same value
    let response = server.get("/api/digest").await;
    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert_eq!(json["digest"]["hex"], digest);
    assert_eq!(json["row_count"], 3);

    // Health now reports a loaded dataset
    let response = server.get("/api/health").await;
    let json: Value = response.json();
    assert_eq!(json["dataset_loaded"], true);
}

#[tokio::test]
async fn test_digest_requires_dataset() {
    let server = test_server().await;

    let response = server.get("/api/digest").await;
    assert_eq!(response.status_code(), 404);
    let json: Value = response.json();
    assert_eq!(json["error"], "no_dataset");
}

#[tokio::test]
async fn test_upload_rejects_malformed_csv() {
    let server = test_server().await;

    // Ragged row
    let response = server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes("a,b\n1,2,3\n".as_bytes().to_vec().into())
        .await;
    assert_eq!(response.status_code(), 400);
    let json: Value = response.json();
    assert_eq!(json["error"], "invalid_dataset");

    // Empty body
    let response = server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes("".as_bytes().to_vec().into())
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_ledger_endpoints_unavailable_when_disabled() {
    let server = test_server().await;

    server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes(SALES_CSV.as_bytes().to_vec().into())
        .await;

    for (method, path) in [
        ("POST", "/api/anchor"),
        ("GET", "/api/verify"),
        ("GET", "/api/eda"),
    ] {
        let response = match method {
            "POST" => server.post(path).await,
            _ => server.get(path).await,
        };
        assert_eq!(response.status_code(), 503, "{} {}", method, path);
        let json: Value = response.json();
        assert_eq!(json["error"], "blockchain_disabled");
    }
}

#[tokio::test]
async fn test_ledger_endpoints_require_dataset_first() {
    let server = test_server().await;

    // Without a dataset the missing dataset wins over the disabled ledger
    let response = server.get("/api/verify").await;
    assert_eq!(response.status_code(), 404);
    let json: Value = response.json();
    assert_eq!(json["error"], "no_dataset");
}

#[tokio::test]
async fn test_tamper_demo() {
    let server = test_server().await;

    server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes(SALES_CSV.as_bytes().to_vec().into())
        .await;

    let response = server.post("/api/tamper-demo").await;
    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert_eq!(json["digest_changed"], true);
    assert_eq!(json["column"], "qty");
    assert_ne!(json["original_hex"], json["tampered_hex"]);
}

#[tokio::test]
async fn test_tamper_demo_needs_numeric_column() {
    let server = test_server().await;

    server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes("name\nwidget\n".as_bytes().to_vec().into())
        .await;

    let response = server.post("/api/tamper-demo").await;
    assert_eq!(response.status_code(), 400);
    let json: Value = response.json();
    assert_eq!(json["error"], "invalid_dataset");
}

#[tokio::test]
async fn test_upload_replaces_active_dataset() {
    let server = test_server().await;

    server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes(SALES_CSV.as_bytes().to_vec().into())
        .await;
    let first: Value = server.get("/api/digest").await.json();

    server
        .post("/api/dataset")
        .content_type("text/csv")
        .bytes("x\n1\n".as_bytes().to_vec().into())
        .await;
    let second: Value = server.get("/api/digest").await.json();

    assert_ne!(first["digest"]["hex"], second["digest"]["hex"]);
    assert_eq!(second["row_count"], 1);
}
