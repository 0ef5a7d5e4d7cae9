//! Terminal errors of the form router and their HTTP mapping.

use axum::http::StatusCode;
use thiserror::Error;

use crate::render::RenderError;
use crate::service::ServiceError;

/// Every way a form request can fail. Each variant is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Either process name and version are required or process instance Id (with or without task name) or task instance Id.")]
    MalformedRoute,

    #[error("The user parameter must be a numeric user id.")]
    InvalidUser,

    #[error("User not Authorized")]
    Unauthorized,

    #[error("Cannot find the process")]
    ProcessNotFound,

    #[error("Cannot find the process instance")]
    ProcessInstanceNotFound,

    #[error("Cannot find the task instance")]
    TaskNotFound,

    #[error("Cannot find the form with name {page}")]
    FormNotFound { page: String },

    #[error("Cannot find the resource {path} of the form {page}")]
    ResourceNotFound { page: String, path: String },

    /// Page rendering failed; carries the underlying message unchanged.
    #[error("{0}")]
    RenderFailure(String),

    /// The process form service failed for a reason other than "not found".
    #[error("{0}")]
    Service(String),
}

impl FormError {
    pub fn status(&self) -> StatusCode {
        match self {
            FormError::MalformedRoute | FormError::InvalidUser => StatusCode::BAD_REQUEST,
            FormError::Unauthorized => StatusCode::FORBIDDEN,
            FormError::ProcessNotFound
            | FormError::ProcessInstanceNotFound
            | FormError::TaskNotFound
            | FormError::FormNotFound { .. }
            | FormError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            FormError::RenderFailure(_) | FormError::Service(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for FormError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ProcessDefinitionNotFound(_) => FormError::ProcessNotFound,
            ServiceError::ProcessInstanceNotFound(_) => FormError::ProcessInstanceNotFound,
            ServiceError::ActivityInstanceNotFound(_) => FormError::TaskNotFound,
            // Only reachable when a mapping lookup escapes the legacy fallback
            err @ ServiceError::FormMappingNotFound { .. } => FormError::Service(err.to_string()),
            ServiceError::Engine(message) => FormError::Service(message),
        }
    }
}

impl From<RenderError> for FormError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::PageNotFound(page) => FormError::FormNotFound { page },
            RenderError::ResourceNotFound { page, path } => {
                FormError::ResourceNotFound { page, path }
            }
            RenderError::Failure(message) => FormError::RenderFailure(message),
        }
    }
}
