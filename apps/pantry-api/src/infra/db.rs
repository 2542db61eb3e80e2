use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the shared connection pool. Does not run migrations; the schema is
/// managed outside this service.
pub async fn connect_db(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(max_connections)
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    info!(max_connections, "db.connected");
    Ok(conn)
}
