//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes, graceful shutdown)
//!     → middleware/ (recovery → request ID → observation)
//!     → handlers.rs (home, health, stress, metrics)
//!     → response.rs (JSON envelope, fixed failure bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{send_json, Envelope};
pub use server::{AppState, HttpServer};
