//! Process form router library.
//!
//! Resolves the form of a process, process instance or task instance and
//! answers with a redirect, a rendered custom page or an error status.

pub mod config;
pub mod form;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod security;
pub mod service;

pub use config::schema::RouterConfig;
pub use form::{FormRequest, FormResponse, FormRouter};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
