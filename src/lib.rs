//! Dataset integrity anchoring service library.

pub mod blockchain;
pub mod config;
pub mod dataset;
pub mod http;
pub mod integrity;
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
