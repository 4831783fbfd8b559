use crate::db::models::StoredValue;
use chrono::Local;
use sqlx::{query, query_as, SqlitePool};

/// Retrieves a stored row by key
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<StoredValue>, sqlx::Error> {
    query_as::<_, StoredValue>("SELECT key, value, updated FROM client_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Inserts or overwrites the value stored under `key`
pub async fn put_value(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO client_store (key, value, updated) VALUES (?, ?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
    )
    .bind(key)
    .bind(value)
    .bind(Local::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Deletes the row under `key`; returns whether one existed
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
    let result = query("DELETE FROM client_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::memory_pool;

    #[tokio::test]
    async fn put_overwrites_existing_key() -> Result<(), sqlx::Error> {
        let pool = memory_pool().await?;

        put_value(&pool, "farmerData", "{\"name\":\"A\"}").await?;
        put_value(&pool, "farmerData", "{\"name\":\"B\"}").await?;

        let row = get_value(&pool, "farmerData").await?;
        assert_eq!(row.map(|row| row.value), Some("{\"name\":\"B\"}".to_string()));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM client_store")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_missing_keys() -> Result<(), sqlx::Error> {
        let pool = memory_pool().await?;

        assert!(!delete_value(&pool, "farmerData").await?);
        put_value(&pool, "farmerData", "{}").await?;
        assert!(delete_value(&pool, "farmerData").await?);
        assert_eq!(get_value(&pool, "farmerData").await?, None);
        Ok(())
    }
}
