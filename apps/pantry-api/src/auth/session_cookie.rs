//! Decoding of the identity provider's session cookie.
//!
//! The provider stores the session under a single cookie, or splits a large
//! value across `<name>.0`, `<name>.1`, ... chunks. The value is one of:
//! a bare access token, a JSON session object, or `base64-` followed by the
//! base64url-encoded JSON session.

use actix_web::cookie::Cookie;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::Deserialize;

const BASE64_PREFIX: &str = "base64-";

/// Access token recovered from session cookies, plus the cookie names it came
/// from so a stale session can be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub access_token: String,
    pub cookie_names: Vec<String>,
}

#[derive(Deserialize)]
struct StoredSession {
    access_token: String,
}

/// Find and decode the session stored under `name`.
pub fn read_session_cookie(cookies: &[Cookie<'static>], name: &str) -> Option<SessionCookie> {
    let (raw, cookie_names) = collect_value(cookies, name)?;
    let access_token = decode_access_token(&raw)?;

    Some(SessionCookie {
        access_token,
        cookie_names,
    })
}

fn collect_value(cookies: &[Cookie<'static>], name: &str) -> Option<(String, Vec<String>)> {
    let lookup = |wanted: &str| {
        cookies
            .iter()
            .find(|c| c.name() == wanted)
            .map(|c| c.value().to_string())
    };

    if let Some(value) = lookup(name) {
        return Some((value, vec![name.to_string()]));
    }

    let mut value = String::new();
    let mut names = Vec::new();
    for index in 0.. {
        let chunk_name = format!("{name}.{index}");
        match lookup(&chunk_name) {
            Some(chunk) => {
                value.push_str(&chunk);
                names.push(chunk_name);
            }
            None => break,
        }
    }

    if names.is_empty() {
        None
    } else {
        Some((value, names))
    }
}

fn decode_access_token(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let text = match raw.strip_prefix(BASE64_PREFIX) {
        Some(encoded) => {
            let encoded = encoded.trim_end_matches('=');
            let bytes = URL_SAFE_NO_PAD
                .decode(encoded)
                .or_else(|_| STANDARD.decode(raw.trim_start_matches(BASE64_PREFIX)))
                .ok()?;
            String::from_utf8(bytes).ok()?
        }
        None => raw.to_string(),
    };

    let token = if text.starts_with('{') {
        serde_json::from_str::<StoredSession>(&text).ok()?.access_token
    } else {
        text
    };

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
