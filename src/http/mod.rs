//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, tracing, timeout)
//!     → security (session middleware)
//!     → request.rs (build FormRequest from the HTTP request)
//!     → form::FormRouter (resolve and dispatch)
//!     → FormResponse → HTTP response
//! ```

pub mod request;
pub mod server;

pub use request::{form_request, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
