//! The signed-in farmer, kept in one row of the local store.

use crate::db::queries::{delete_value, get_value, put_value};
use crate::models::FarmerProfile;
use sqlx::SqlitePool;
use thiserror::Error;

/// Key the profile JSON is stored under.
pub const PROFILE_KEY: &str = "farmerData";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile store query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored profile is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Process-wide profile state with an explicit lifecycle: `init` on startup,
/// `save` on login, `clear` on logout.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
    current: Option<FarmerProfile>,
}

impl ProfileStore {
    /// Loads whatever profile is stored. A corrupt row is logged and
    /// treated as signed out.
    pub async fn init(pool: SqlitePool) -> Result<Self, ProfileError> {
        let current = match get_value(&pool, PROFILE_KEY).await? {
            Some(row) => match serde_json::from_str::<FarmerProfile>(&row.value) {
                Ok(profile) => Some(profile),
                Err(error) => {
                    tracing::warn!(%error, "ignoring unreadable stored profile");
                    None
                }
            },
            None => None,
        };

        tracing::debug!(signed_in = current.is_some(), "profile store ready");
        Ok(Self { pool, current })
    }

    pub const fn get(&self) -> Option<&FarmerProfile> {
        self.current.as_ref()
    }

    pub const fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the stored profile entirely.
    pub async fn save(&mut self, profile: FarmerProfile) -> Result<(), ProfileError> {
        if profile.name.trim().is_empty() {
            return Err(ProfileError::MissingField("Name"));
        }
        if profile.mobile.trim().is_empty() {
            return Err(ProfileError::MissingField("Mobile number"));
        }

        let json = serde_json::to_string(&profile)?;
        put_value(&self.pool, PROFILE_KEY, &json).await?;
        tracing::info!(location = %profile.location, "profile saved");
        self.current = Some(profile);
        Ok(())
    }

    pub async fn clear(&mut self) -> Result<(), ProfileError> {
        delete_value(&self.pool, PROFILE_KEY).await?;
        self.current = None;
        tracing::info!("profile cleared");
        Ok(())
    }
}
