use sea_orm::DatabaseConnection;

use crate::config::BackendConfig;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::{AppState, DEFAULT_SESSION_COOKIE};
use crate::state::security_config::SecurityConfig;

enum DbSource {
    None,
    Connect { url: String, max_connections: u32 },
    Existing(DatabaseConnection),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    session_cookie: String,
    db: DbSource,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            db: DbSource::None,
        }
    }

    /// Take the database target, key material and cookie name from config.
    pub fn with_config(mut self, config: &BackendConfig) -> Self {
        self.security_config = config.security.clone();
        self.session_cookie = config.session_cookie.clone();
        self.db = DbSource::Connect {
            url: config.database_url.clone(),
            max_connections: config.max_connections,
        };
        self
    }

    /// Use an already open connection (tests hand in a `MockDatabase` here).
    pub fn with_existing_db(mut self, conn: DatabaseConnection) -> Self {
        self.db = DbSource::Existing(conn);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db {
            DbSource::None => AppState::new_without_db(self.security_config),
            DbSource::Existing(conn) => AppState::new(conn, self.security_config),
            DbSource::Connect {
                url,
                max_connections,
            } => {
                let conn = connect_db(&url, max_connections).await?;
                AppState::new(conn, self.security_config)
            }
        };
        Ok(state.with_session_cookie(self.session_cookie))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
