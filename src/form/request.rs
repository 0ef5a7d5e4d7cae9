//! The form router's view of an HTTP request.

use axum::http::HeaderMap;
use url::form_urlencoded;

/// Request data the router and the page renderer need.
#[derive(Debug, Clone, Default)]
pub struct FormRequest {
    /// Web application context path (e.g., "/bonita").
    pub context_path: String,
    /// Servlet path of the router (e.g., "/portal/form").
    pub servlet_path: String,
    /// Remainder of the path after context and servlet paths, still encoded.
    pub path_info: String,
    /// Decoded query parameters, in request order.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl FormRequest {
    pub fn new(
        context_path: impl Into<String>,
        servlet_path: impl Into<String>,
        path_info: impl Into<String>,
    ) -> Self {
        Self {
            context_path: context_path.into(),
            servlet_path: servlet_path.into(),
            path_info: path_info.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Attach a raw (still encoded) query string.
    pub fn with_query(mut self, raw: &str) -> Self {
        self.query = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// First value of a query parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameters() {
        let request = FormRequest::new("/bonita", "/portal/form", "/taskInstance/1")
            .with_query("user=12&locale=fr&locale=de&name=a+b%26c");
        assert_eq!(request.parameter("user"), Some("12"));
        assert_eq!(request.parameter("locale"), Some("fr"));
        assert_eq!(request.parameter("name"), Some("a b&c"));
        assert_eq!(request.parameter("missing"), None);
    }
}
