//! Per-request backend handles.
//!
//! [`create_client`] binds the shared connection pool and verification key to
//! the credentials of one request. Construction does no I/O; the handle only
//! touches the database when asked for the caller's identity or for rows.

use std::sync::Arc;

use actix_web::http::header::HeaderMap;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::cookies::{removal_cookie, CookieStore};
use crate::adapters::{lookups_sea, users_sea};
use crate::auth::credentials::Credentials;
use crate::auth::jwt::{verify_access_token, TokenError};
use crate::auth::session_cookie::SessionCookie;
use crate::entities::{categories, products, staple_definitions, units};
use crate::error::AppError;
use crate::repos::lookups::LookupStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Identity behind a verified session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credentials presented")]
    MissingCredentials,
    #[error("session token rejected: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("token subject is not a user id")]
    InvalidSubject,
    #[error("no user for token subject")]
    UnknownUser,
    #[error("user is banned")]
    Banned,
    #[error("identity lookup failed: {0}")]
    Backend(DbErr),
}

impl AuthError {
    /// True when the caller simply has no usable identity. The remaining
    /// cases are server faults.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(
            self,
            AuthError::Backend(_) | AuthError::InvalidToken(TokenError::Key(_))
        )
    }

    /// Short reason for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::InvalidToken(e) => e.reason(),
            AuthError::InvalidSubject => "invalid_subject",
            AuthError::UnknownUser => "unknown_user",
            AuthError::Banned => "banned",
            AuthError::Backend(_) => "backend_error",
        }
    }
}

/// Authenticated view of the backend for a single request.
pub struct BackendHandle {
    conn: Arc<DatabaseConnection>,
    security: SecurityConfig,
    credentials: Option<Credentials>,
    cookies: Arc<dyn CookieStore>,
}

/// Build a handle for the current request.
///
/// Credentials come from a `Bearer` authorization header when one is present,
/// otherwise from the session cookie named in `state`.
pub fn create_client(
    state: &AppState,
    headers: &HeaderMap,
    cookies: Arc<dyn CookieStore>,
) -> Result<BackendHandle, AppError> {
    let conn = state
        .shared_db()
        .ok_or_else(|| AppError::internal("database connection not configured"))?;

    let credentials = Credentials::resolve(headers, &cookies.get_all(), &state.session_cookie);

    Ok(BackendHandle {
        conn,
        security: state.security.clone(),
        credentials,
        cookies,
    })
}

impl BackendHandle {
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Resolve the caller behind this handle's credentials.
    ///
    /// The token is verified locally first, so absent or bad tokens never
    /// reach the database. A cookie session that fails verification is
    /// cleared from the browser on a best-effort basis.
    pub async fn get_user(&self) -> Result<AuthUser, AuthError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AuthError::MissingCredentials)?;

        let claims = match verify_access_token(credentials.access_token(), &self.security) {
            Ok(claims) => claims,
            Err(e) => {
                if let Credentials::Cookie(session) = credentials {
                    self.discard_session(session);
                }
                return Err(AuthError::InvalidToken(e));
            }
        };

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)?;

        let user = users_sea::find_user_by_id(self.conn.as_ref(), user_id)
            .await
            .map_err(AuthError::Backend)?
            .ok_or(AuthError::UnknownUser)?;

        if user
            .banned_until
            .is_some_and(|until| until > OffsetDateTime::now_utc())
        {
            return Err(AuthError::Banned);
        }

        Ok(AuthUser {
            id: user.id,
            email: user.email.or(claims.email),
            role: claims.role,
        })
    }

    fn discard_session(&self, session: &SessionCookie) {
        let removals = session
            .cookie_names
            .iter()
            .map(|name| removal_cookie(name))
            .collect();

        // Cookie refresh is owned by the identity provider; a context that
        // cannot write cookies just leaves the stale ones in place.
        if let Err(e) = self.cookies.set_all(removals) {
            debug!(error = %e, "backend.cookie_write_skipped");
        }
    }
}

#[async_trait]
impl LookupStore for BackendHandle {
    async fn select_units(&self) -> Result<Vec<units::Model>, DbErr> {
        lookups_sea::find_all_units(self.conn.as_ref()).await
    }

    async fn select_categories(&self) -> Result<Vec<categories::Model>, DbErr> {
        lookups_sea::find_all_categories(self.conn.as_ref()).await
    }

    async fn select_active_staples_with_product(
        &self,
    ) -> Result<Vec<(staple_definitions::Model, products::Model)>, DbErr> {
        lookups_sea::find_active_staples_with_product(self.conn.as_ref()).await
    }
}
