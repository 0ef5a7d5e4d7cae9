//! Locale of the current request.

use axum::http::header;

use crate::form::FormRequest;
use crate::security::access_control::cookie_value;
use crate::security::Session;

/// Cookie the portal stores the user's locale in.
pub const LOCALE_COOKIE: &str = "BOS_Locale";

/// Resolve the locale: `locale` query parameter, locale cookie, session
/// locale, first `Accept-Language` tag, then `default`.
pub fn resolve_locale(request: &FormRequest, session: &Session, default: &str) -> String {
    if let Some(locale) = request.parameter("locale").filter(|l| !l.is_empty()) {
        return locale.to_string();
    }
    if let Some(locale) = cookie_value(&request.headers, LOCALE_COOKIE) {
        return locale;
    }
    if let Some(locale) = &session.locale {
        return locale.clone();
    }
    request
        .headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|h| h.to_str().ok())
        .and_then(first_language_tag)
        .unwrap_or_else(|| default.to_string())
}

fn first_language_tag(header: &str) -> Option<String> {
    header
        .split(',')
        .next()
        .and_then(|tag| tag.split(';').next())
        .map(|tag| tag.trim().replace('-', "_"))
        .filter(|tag| !tag.is_empty() && tag != "*")
}
