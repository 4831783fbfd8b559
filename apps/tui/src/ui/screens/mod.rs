pub mod chat;
pub mod crops;
pub mod dashboard;
pub mod farm;
pub mod insights;
pub mod login;
pub mod market;
pub mod recommendations;
pub mod sensors;
pub mod weather;
pub mod yield_tab;
