//! Inventory REST API: product records keyed by product code, each with an
//! optional image kept on local disk.

pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod uploads;
pub mod validation;

pub use routes::build_app;
pub use state::AppState;
