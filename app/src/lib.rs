// app/src/lib.rs

//! HTTP back office for orders and customers, built on the `orderdesk`
//! filter and CRUD core.

pub mod config;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod requests;
pub mod resources;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
