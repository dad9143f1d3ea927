use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

fn connect_options(profile: &DbProfile, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match profile {
        // Every new connection would open a different empty database
        DbProfile::InMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbProfile::SqliteFile { .. } => {
            opts.max_connections(1);
        }
        DbProfile::Prod | DbProfile::Test => {
            opts.max_connections(16).min_connections(1);
        }
    }
    opts
}

/// Connects without running migrations.
pub async fn connect_db(profile: &DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;
    let conn = Database::connect(connect_options(profile, url))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, ?profile, "database connection failed");
            AppError::db_unavailable("could not connect to database")
        })?;
    Ok(conn)
}

/// Connects and brings the schema up to date.
pub async fn bootstrap_db(profile: &DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile, owner).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(?profile, "database ready");
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    use super::*;

    #[tokio::test]
    async fn test_in_memory_bootstrap_creates_schema() {
        let conn = bootstrap_db(&DbProfile::InMemory, DbOwner::App)
            .await
            .unwrap();
        let row = conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT count(*) AS n FROM sqlite_master WHERE type = 'table' AND name = 'game_phases'",
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 1);
    }

    #[tokio::test]
    async fn test_sqlite_file_schema_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let profile = DbProfile::SqliteFile {
            file: dir.path().join("wordwolf.db").display().to_string(),
        };

        let first = bootstrap_db(&profile, DbOwner::Owner).await.unwrap();
        first.close().await.unwrap();

        let conn = connect_db(&profile, DbOwner::App).await.unwrap();
        let row = conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT count(*) AS n FROM sqlite_master WHERE type = 'table' AND name = 'games'",
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 1);
    }
}
