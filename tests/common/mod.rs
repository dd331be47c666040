//! Shared utilities for integration tests.

use axum_test::TestServer;
use integrity_anchor::config::AppConfig;
use integrity_anchor::http::HttpServer;

/// A small sales dataset with numeric and text columns.
pub const SALES_CSV: &str = "\
product,region,qty,price
widget,north,10,1.50
gadget,south,3,9.99
widget,east,5,2.00
";

/// Same rows and columns as SALES_CSV, different ordering.
#[allow(dead_code)]
pub const SALES_CSV_SHUFFLED: &str = "\
region,price,product,qty
east,2.00,widget,5
north,1.50,widget,10
south,9.99,gadget,3
";

/// SALES_CSV with a single cell changed (widget qty 10 -> 11).
#[allow(dead_code)]
pub const SALES_CSV_TAMPERED: &str = "\
product,region,qty,price
widget,north,11,1.50
gadget,south,3,9.99
widget,east,5,2.00
";

/// Start an in-process server with blockchain integration disabled.
#[allow(dead_code)]
pub async fn test_server() -> TestServer {
    let config = AppConfig::default();
    let server = HttpServer::new(config)
        .await
        .expect("server construction with blockchain disabled cannot fail");
    TestServer::new(server.router()).expect("failed to create test server")
}
