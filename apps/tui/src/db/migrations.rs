use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Sets up the database by creating the necessary tables if they don't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS client_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates a connection pool for `database_url`, creating the file and
/// schema when missing.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::info!(%database_url, "opening profile store");

    if let Some(parent) = extract_db_path_from_url(database_url)?
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        if !parent.exists() {
            tracing::debug!(path = %parent.display(), "creating database directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                color_eyre::eyre::eyre!("Failed to create database directory: {e}")
            })?;
        }
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Error checking database: {e}"))?;

    if !db_exists {
        tracing::info!("database does not exist, creating it");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}"))?;

    setup_database(&pool)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up database schema: {e}"))?;

    Ok(pool)
}

/// In-memory pool for tests. A single connection keeps every query on the
/// same database.
#[cfg(test)]
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    setup_database(&pool).await?;
    Ok(pool)
}

/// Helper function to extract the database path from a SQLite URL
fn extract_db_path_from_url(url: &str) -> Result<std::path::PathBuf> {
    let Some(path_part) = url.strip_prefix("sqlite://") else {
        return Err(color_eyre::eyre::eyre!("Not a valid SQLite URL: {url}"));
    };
    let path_part = path_part.split('?').next().unwrap_or_default();

    if cfg!(windows) {
        // sqlite:///C:/path or sqlite://C:/path
        if path_part.find(':').is_some_and(|idx| idx > 0) {
            return Ok(path_part.trim_start_matches('/').into());
        }
    }

    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')).into());
    }

    Ok(path_part.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extracts_absolute_and_relative_paths() -> Result<()> {
        assert_eq!(
            extract_db_path_from_url("sqlite:///var/lib/krishi.db")?,
            PathBuf::from("/var/lib/krishi.db")
        );
        assert_eq!(
            extract_db_path_from_url("sqlite://data/krishi.db?mode=rwc")?,
            PathBuf::from("data/krishi.db")
        );
        assert!(extract_db_path_from_url("postgres://localhost/db").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn schema_setup_is_idempotent() -> Result<(), sqlx::Error> {
        let pool = memory_pool().await?;
        setup_database(&pool).await?;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'client_store'",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(tables, 1);
        Ok(())
    }

    #[tokio::test]
    async fn file_database_is_created_on_first_open() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("krishi-db-{}", std::process::id()));
        let path = dir.join("nested").join("krishi.db");
        let url = crate::config::database_url_for(&path)?;

        let pool = create_database_pool(&url).await?;
        pool.close().await;

        assert!(path.exists());
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
