//! Database infrastructure - connection bootstrap and schema setup.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, DbProfile};
use crate::error::AppError;

/// Connect to the configured database and bring the schema up to date.
///
/// Single entrypoint used by both the binary and the test harness.
pub async fn bootstrap_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind, profile)?;

    let mut opts = ConnectOptions::new(url);
    if kind == DbKind::SqliteMemory {
        // Every pooled connection to sqlite::memory: sees a distinct database;
        // a single connection keeps one coherent store.
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    Migrator::up(&conn, None).await?;

    info!(backend = ?kind, "database ready");
    Ok(conn)
}
