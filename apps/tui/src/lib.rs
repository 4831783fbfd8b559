// Export our modules for use in binaries and tests
pub mod backend;
pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod fallback;
pub mod fetch;
pub mod location;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod regions;

pub use domain::{DataDomain, Tab};
