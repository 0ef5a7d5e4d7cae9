//! Session middleware.
//! Resolves the caller's session before the form router runs.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::security::session::SessionStore;

/// State required for session resolution.
#[derive(Clone)]
pub struct SessionState {
    pub store: Arc<dyn SessionStore>,
    pub cookie_name: String,
}

pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Find a token: session cookie first, then bearer header
    let token = match session_token(req.headers(), &state.cookie_name) {
        Some(token) => token,
        None => {
            tracing::debug!(path = %req.uri().path(), "Request without session");
            return (StatusCode::UNAUTHORIZED, "No active session").into_response();
        }
    };

    // 2. Resolve it
    match state.store.lookup(&token) {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => {
            tracing::warn!(path = %req.uri().path(), "Unknown session token");
            (StatusCode::UNAUTHORIZED, "Invalid session").into_response()
        }
    }
}

/// Extract the session token from the request headers.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = cookie_value(headers, cookie_name) {
        return Some(value);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Value of the named cookie, if present.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}
