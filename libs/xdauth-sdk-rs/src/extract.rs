//! Token extraction utilities.

use percent_encoding::percent_decode_str;

/// Cookie that carries the token when it is not sent as a bearer header.
pub const TOKEN_COOKIE: &str = "xdauth_token";

/// Query parameter carrying the token on a cross-domain login redirect.
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Trait for accessing HTTP headers in a framework-agnostic way.
///
/// Implement this trait for your framework's header type to use
/// `CrossDomainClient::authenticate()`.
///
/// # Example
///
/// ```rust,ignore
/// use xdauth_sdk::Headers;
///
/// impl Headers for axum::http::HeaderMap {
///     fn get_authorization(&self) -> Option<&str> {
///         self.get("authorization").and_then(|v| v.to_str().ok())
///     }
///
///     fn get_cookie(&self) -> Option<&str> {
///         self.get("cookie").and_then(|v| v.to_str().ok())
///     }
/// }
/// ```
pub trait Headers {
    /// Get the Authorization header value.
    fn get_authorization(&self) -> Option<&str>;

    /// Get the Cookie header value.
    fn get_cookie(&self) -> Option<&str>;
}

/// Extract token from Authorization Bearer header.
pub fn extract_from_header(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract token from cookie header.
///
/// Looks for the `xdauth_token` cookie and percent-decodes its value.
pub fn extract_from_cookie(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(TOKEN_COOKIE)?.strip_prefix('='))
        .filter(|value| !value.is_empty())
        .map(|value| match percent_decode_str(value).decode_utf8() {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.to_string(),
        })
}

/// Extract token from the query string of a login redirect (`a=1&token=...`).
pub fn extract_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
