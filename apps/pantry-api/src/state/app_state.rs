use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Default name of the session cookie written by the identity provider.
pub const DEFAULT_SESSION_COOKIE: &str = "pantry-auth-token";

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool (absent in handler-only tests)
    db: Option<Arc<DatabaseConnection>>,
    /// Token verification settings
    pub security: SecurityConfig,
    /// Base name of the session cookie (chunks use `<name>.N`)
    pub session_cookie: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(Arc::new(db)),
            security,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }

    /// Shared handle to the pool for per-request clients.
    pub fn shared_db(&self) -> Option<Arc<DatabaseConnection>> {
        self.db.clone()
    }
}
