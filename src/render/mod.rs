//! Custom page rendering: the second collaborator of the form router.
//!
//! # Responsibilities
//! - Render a custom page for a form
//! - Serve a named resource beneath a custom page
//! - Determine the locale of the current request
//!
//! # Design Decisions
//! - The router only sees the `PageRenderer` trait
//! - A missing page is a distinct error kind (404); anything else is a failure (500)
//! - `FilesystemPageRenderer` is the bundled host

pub mod filesystem;
pub mod locale;

use axum::response::Response;
use thiserror::Error;

use crate::form::FormRequest;
use crate::security::Session;

pub use filesystem::FilesystemPageRenderer;
pub use locale::resolve_locale;

/// Locale used when nothing else is known.
pub const DEFAULT_LOCALE: &str = "en";

/// Errors reported by a `PageRenderer`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("resource {path} not found in page {page}")]
    ResourceNotFound { page: String, path: String },

    /// Rendering failed; the message is reported to the caller as is.
    #[error("{0}")]
    Failure(String),
}

/// Renders custom pages.
pub trait PageRenderer: Send + Sync {
    /// Render the entry point of a custom page.
    fn display_custom_page(
        &self,
        request: &FormRequest,
        session: &Session,
        page_name: &str,
    ) -> Result<Response, RenderError>;

    /// Serve `resource_path` from beneath a custom page.
    fn display_custom_page_resource(
        &self,
        request: &FormRequest,
        session: &Session,
        page_name: &str,
        resource_path: &str,
    ) -> Result<Response, RenderError>;

    fn current_locale(&self, request: &FormRequest, session: &Session) -> String {
        resolve_locale(request, session, DEFAULT_LOCALE)
    }
}
