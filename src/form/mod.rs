//! Form resolution and dispatch.
//!
//! # Data Flow
//! ```text
//! FormRequest (path info, query, headers) + Session
//!     → router.rs   parse route, resolve ids, authorize
//!     → service     resolve FormReference
//!     → dispatch:
//!         legacy mapping / no mapping → links.rs legacy portal URL → 302
//!         external reference          → links.rs decorated URL    → 302
//!         custom page                 → render::PageRenderer       → page
//!     → FormResponse (exactly one per request)
//! ```
//!
//! # Design Decisions
//! - The router holds only immutable references to its collaborators
//! - Every failure is terminal and becomes a `FormError` with a fixed status
//! - A missing form mapping is recoverable (legacy form), a render failure is not

pub mod error;
pub mod links;
pub mod reference;
pub mod request;
pub mod response;
pub mod router;

pub use error::FormError;
pub use reference::{FormReference, LEGACY_FORMS_NAME};
pub use request::FormRequest;
pub use response::FormResponse;
pub use router::{FormRouter, FormTarget, ResolvedContext};
