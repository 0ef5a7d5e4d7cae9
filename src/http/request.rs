//! Request handling and transformation.
//!
//! # Responsibilities
//! - Split the request path into mount prefix and path info
//! - Carry query string and headers to the form router
//!
//! # Design Decisions
//! - Path info is kept percent-encoded; the route parser decodes per segment
//! - Request ID is added by the server layers before this runs

use axum::http::request::Parts;

use crate::config::PortalConfig;
use crate::form::FormRequest;

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Build the router's view of an HTTP request mounted under `portal`.
pub fn form_request(parts: &Parts, portal: &PortalConfig) -> FormRequest {
    let mount = portal.mount_path();
    let path_info = parts
        .uri
        .path()
        .strip_prefix(mount.as_str())
        .unwrap_or_default();

    FormRequest::new(&portal.context_path, &portal.servlet_path, path_info)
        .with_query(parts.uri.query().unwrap_or_default())
        .with_headers(parts.headers.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_form_request_from_parts() {
        let (parts, _) = Request::builder()
            .uri("http://localhost/bonita/portal/form/process/processus+%C3%A9/1?user=3")
            .header("accept-language", "fr")
            .body(())
            .unwrap()
            .into_parts();

        let request = form_request(&parts, &PortalConfig::default());
        assert_eq!(request.context_path, "/bonita");
        assert_eq!(request.servlet_path, "/portal/form");
        assert_eq!(request.path_info, "/process/processus+%C3%A9/1");
        assert_eq!(request.parameter("user"), Some("3"));
        assert_eq!(request.headers.get("accept-language").unwrap(), "fr");
    }

    #[test]
    fn test_bare_mount_has_empty_path_info() {
        let (parts, _) = Request::builder()
            .uri("/bonita/portal/form")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(form_request(&parts, &PortalConfig::default()).path_info, "");
    }
}
