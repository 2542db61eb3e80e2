use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::security_config::{JwtKey, SecurityConfig};

/// Claims read from identity-provider access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User id (uuid) of the authenticated caller
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("audience mismatch")]
    InvalidAudience,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("verification key unavailable: {0}")]
    Key(String),
}

impl TokenError {
    /// Short reason for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Expired => "token_expired",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::InvalidAudience => "invalid_audience",
            TokenError::Malformed(_) => "invalid_token",
            TokenError::Key(_) => "key_unavailable",
        }
    }
}

/// Verify a session access token and return its claims.
///
/// Expiry is always enforced (with the library's default leeway). The
/// audience is only checked when one is configured.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let key = security
        .decoding_key()
        .map_err(|e| TokenError::Key(e.to_string()))?;

    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = true;
    match &security.audience {
        Some(audience) => validation.set_audience(&[audience.as_str()]),
        None => validation.validate_aud = false,
    }

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAudience => TokenError::InvalidAudience,
            _ => TokenError::Malformed(e.to_string()),
        })
}

/// Mint a token with a 15-minute TTL signed with the configured shared secret.
///
/// Tokens are normally issued by the identity provider; this exists for local
/// tooling and tests. Only secret-based configurations can mint.
pub fn mint_access_token(
    sub: &str,
    email: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let JwtKey::Secret(secret) = &security.jwt_key else {
        return Err(TokenError::Key(
            "minting requires a shared secret".to_string(),
        ));
    };

    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|e| TokenError::Malformed(e.to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        role: Some("authenticated".to_string()),
        aud: security.audience.clone(),
        iat: Some(iat),
        exp: iat + 15 * 60,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Key(e.to_string()))
}
