//! Startup configuration read from the environment.

use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::error::AppError;
use crate::state::app_state::DEFAULT_SESSION_COOKIE;
use crate::state::security_config::SecurityConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Everything the server needs to reach the backend and verify callers.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub security: SecurityConfig,
    pub session_cookie: String,
    /// Raw `CORS_ALLOWED_ORIGINS` value; parsed by the CORS middleware.
    pub cors_allowed_origins: String,
}

impl BackendConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set. Empty values count as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let must_var = |name: &str| {
            var(name).ok_or_else(|| {
                AppError::config(format!("Required environment variable '{name}' is not set"))
            })
        };

        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("BACKEND_PORT", var("BACKEND_PORT"), DEFAULT_PORT)?;
        let database_url = must_var("PANTRY_DATABASE_URL")?;
        let max_connections = parse_or(
            "PANTRY_DB_MAX_CONNECTIONS",
            var("PANTRY_DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;

        let algorithm = var("PANTRY_JWT_ALGORITHM")
            .map(|raw| {
                Algorithm::from_str(raw.trim()).map_err(|_| {
                    AppError::config(format!("Unsupported PANTRY_JWT_ALGORITHM '{raw}'"))
                })
            })
            .transpose()?;

        let security = match (var("PANTRY_JWT_SECRET"), var("PANTRY_JWT_PUBLIC_KEY")) {
            (Some(_), Some(_)) => {
                return Err(AppError::config(
                    "Set only one of PANTRY_JWT_SECRET and PANTRY_JWT_PUBLIC_KEY",
                ))
            }
            (Some(secret), None) => {
                let algorithm = algorithm.unwrap_or(Algorithm::HS256);
                if !is_hmac(algorithm) {
                    return Err(AppError::config(format!(
                        "PANTRY_JWT_SECRET requires an HMAC algorithm, got {algorithm:?}"
                    )));
                }
                SecurityConfig::new(secret.into_bytes()).with_algorithm(algorithm)
            }
            (None, Some(pem)) => {
                let algorithm = algorithm.unwrap_or(Algorithm::RS256);
                if is_hmac(algorithm) {
                    return Err(AppError::config(format!(
                        "PANTRY_JWT_PUBLIC_KEY requires an asymmetric algorithm, got {algorithm:?}"
                    )));
                }
                SecurityConfig::from_public_key_pem(algorithm, pem.into_bytes()).map_err(|e| {
                    AppError::config(format!("Invalid PANTRY_JWT_PUBLIC_KEY: {e}"))
                })?
            }
            (None, None) => {
                return Err(AppError::config(
                    "One of PANTRY_JWT_SECRET or PANTRY_JWT_PUBLIC_KEY must be set",
                ))
            }
        };

        let security = match var("PANTRY_JWT_AUDIENCE") {
            Some(audience) => security.with_audience(audience),
            None => security,
        };

        let session_cookie =
            var("PANTRY_SESSION_COOKIE").unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());
        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            security,
            session_cookie,
            cors_allowed_origins,
        })
    }
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} has an invalid value '{value}'"))),
    }
}
