// app/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use orderdesk_app::config::{AppConfig, StorageBackend};
use orderdesk_app::repositories::Repositories;
use orderdesk_app::state::AppState;
use orderdesk_app::telemetry::init_tracing;
use orderdesk_app::web::configure_app_routes;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  init_tracing(app_config.log_format);
  tracing::info!(config = ?app_config, "Starting order desk server...");

  let repositories = match app_config.storage_backend {
    StorageBackend::Postgres => {
      let database_url = app_config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;
      let db_pool = PgPoolOptions::new()
        .max_connections(app_config.database_max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");

      if app_config.run_migrations {
        sqlx::migrate!("./migrations")
          .run(&db_pool)
          .await
          .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied.");
      }
      Repositories::postgres(db_pool)
    }
    StorageBackend::Memory => {
      tracing::warn!("Using the in-memory store; data is lost on shutdown.");
      Repositories::memory()
    }
  };

  let app_state = AppState::new(app_config.clone(), repositories);

  let server_address = (app_config.server_host.clone(), app_config.server_port);
  tracing::info!("Attempting to bind server to {}:{}...", server_address.0, server_address.1);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(server_address)
  .context("Failed to bind server address")?
  .run()
  .await
  .context("Server terminated with an error")
}
