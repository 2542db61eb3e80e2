//! JWT and session-cookie helpers for tests

use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use pantry_api::auth::jwt::mint_access_token;
use pantry_api::state::app_state::DEFAULT_SESSION_COOKIE;
use pantry_api::state::security_config::SecurityConfig;

use super::mock_db::USER_ID;

/// Fresh access token for the seeded test user.
pub fn mint_test_token(sec: &SecurityConfig) -> String {
    mint_access_token(USER_ID, Some("cook@example.com"), SystemTime::now(), sec)
        .expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sec))
}

/// Token that expired an hour ago or more.
pub fn mint_expired_token(sec: &SecurityConfig) -> String {
    let past = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
    mint_access_token(USER_ID, Some("cook@example.com"), past, sec)
        .expect("should mint expired token successfully")
}

/// Session cookie in the identity provider's `base64-` JSON encoding.
pub fn session_cookie(access_token: &str) -> Cookie<'static> {
    let session = serde_json::json!({
        "access_token": access_token,
        "token_type": "bearer",
    });
    let encoded = URL_SAFE_NO_PAD.encode(session.to_string());
    Cookie::new(DEFAULT_SESSION_COOKIE, format!("base64-{encoded}"))
}
