//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → access_control.rs (extract session token from cookie or bearer header)
//!     → session.rs (resolve token against the session store)
//!     → Session attached to request extensions
//!     → form handler
//! ```
//!
//! # Design Decisions
//! - The session is read-only once resolved
//! - Requests without a resolvable session never reach the form router

pub mod access_control;
pub mod session;

pub use access_control::{session_middleware, SessionState};
pub use session::{InMemorySessionStore, Session, SessionStore};
