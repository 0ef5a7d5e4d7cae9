//! Terminal outcome of a form request.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::form::error::FormError;

/// The single response produced for a form request.
pub enum FormResponse {
    /// 302 to the given location.
    Redirect(String),
    /// Output of the page renderer.
    Rendered(Response),
    Error(FormError),
}

impl FormResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            FormResponse::Redirect(_) => StatusCode::FOUND,
            FormResponse::Rendered(response) => response.status(),
            FormResponse::Error(err) => err.status(),
        }
    }

    /// Label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            FormResponse::Redirect(_) => "redirect",
            FormResponse::Rendered(_) => "rendered",
            FormResponse::Error(_) => "error",
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            FormResponse::Redirect(location) => Some(location),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            FormResponse::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Debug for FormResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormResponse::Redirect(location) => f.debug_tuple("Redirect").field(location).finish(),
            FormResponse::Rendered(response) => {
                f.debug_tuple("Rendered").field(&response.status()).finish()
            }
            FormResponse::Error(err) => f.debug_tuple("Error").field(err).finish(),
        }
    }
}

impl IntoResponse for FormResponse {
    fn into_response(self) -> Response {
        match self {
            FormResponse::Redirect(location) => match HeaderValue::from_str(&location) {
                Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
                Err(_) => {
                    tracing::error!(location = %location, "Redirect location is not a valid header value");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect location").into_response()
                }
            },
            FormResponse::Rendered(response) => response,
            FormResponse::Error(err) => (err.status(), err.to_string()).into_response(),
        }
    }
}
