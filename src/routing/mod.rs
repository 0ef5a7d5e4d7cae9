//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path info (after context path and servlet path)
//!     → route.rs (split, decode, classify)
//!     → Return: Route + optional resource sub-path
//! ```
//!
//! # Design Decisions
//! - Route shapes are a closed sum type, matched exhaustively by the form router
//! - Parsing never fails: anything unrecognised becomes `Route::Malformed`
//! - Segments are decoded with form-URL rules (`+` is a space)

pub mod route;

pub use route::{parse_route, ParsedPath, Route};
