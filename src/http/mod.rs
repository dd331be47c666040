//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → dashboard.rs (embedded web form UI)
//!     → handlers.rs (upload / digest / anchor / verify / eda)
//!     → response.rs (error → JSON problem mapping)
//! ```

pub mod dashboard;
pub mod handlers;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{ActiveDataset, AppState, ChainState, HttpServer};
