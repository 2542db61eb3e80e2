//! Per-request credential resolution.

use actix_web::cookie::Cookie;
use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use super::session_cookie::{read_session_cookie, SessionCookie};

/// Where the caller's access token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    BearerToken(String),
    Cookie(SessionCookie),
}

impl Credentials {
    /// Resolve credentials for one request.
    ///
    /// A well-formed `Authorization: Bearer <token>` header wins; anything else
    /// in that header is ignored and the session cookie is consulted instead.
    pub fn resolve(
        headers: &HeaderMap,
        cookies: &[Cookie<'static>],
        session_cookie: &str,
    ) -> Option<Self> {
        if let Some(token) = bearer_token(headers) {
            return Some(Credentials::BearerToken(token));
        }
        read_session_cookie(cookies, session_cookie).map(Credentials::Cookie)
    }

    pub fn access_token(&self) -> &str {
        match self {
            Credentials::BearerToken(token) => token,
            Credentials::Cookie(session) => &session.access_token,
        }
    }

    /// Credential source label for logs.
    pub fn source(&self) -> &'static str {
        match self {
            Credentials::BearerToken(_) => "bearer",
            Credentials::Cookie(_) => "cookie",
        }
    }
}

/// Token from a `Bearer <token>` authorization header, if present and well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token.to_string())
}
