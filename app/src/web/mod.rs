// app/src/web/mod.rs

pub mod envelope;
pub mod extractors;
pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use extractors::AuthSession;
pub use routes::configure_app_routes;
