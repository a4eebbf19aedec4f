//! The `token` session cookie.
//!
//! Parsing walks the raw `Cookie` header; building produces a complete
//! `Set-Cookie` value.

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Find the session token in a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    format!(
        "{TOKEN_COOKIE}={token}; Path=/; HttpOnly;{} SameSite=Strict; Max-Age={max_age_secs}",
        if secure { " Secure;" } else { "" }
    )
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
