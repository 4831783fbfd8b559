use sqlx::FromRow;

/// One row of the local key-value store
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct StoredValue {
    pub key: String,
    pub value: String,
    pub updated: String,
}
