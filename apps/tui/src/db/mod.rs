pub mod migrations;
pub mod models;
pub mod profile;
pub mod queries;
pub use migrations::{create_database_pool, setup_database};
pub use profile::{ProfileError, ProfileStore};
