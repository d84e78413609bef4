// app/src/web/handlers/check_handlers.rs

//! Operational probes.

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use crate::state::AppState;
use crate::web::envelope::respond;
use crate::web::rate_limit::client_ip;

#[instrument(name = "handler::check::db", skip_all)]
pub async fn db_check_handler(app_state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
  let outcome = app_state.probe.ping().await.map(|()| {
    json!({ "status": "Application is up and running, database connection is ok!" })
  });
  respond(&req, StatusCode::OK, outcome)
}

pub async fn health_check_handler(req: HttpRequest) -> HttpResponse {
  respond(
    &req,
    StatusCode::OK,
    Ok(json!({ "status": "Application is up and running, health is ok!" })),
  )
}

pub async fn static_check_handler(req: HttpRequest) -> HttpResponse {
  respond(&req, StatusCode::OK, Ok(json!({ "status": true })))
}

pub async fn ip_check_handler(app_state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
  let ip = client_ip(&req, app_state.config.trust_forwarded_for);
  respond(&req, StatusCode::OK, Ok(json!({ "ip": ip })))
}

/// Drops rate-limit windows and expired token revocations.
#[instrument(name = "handler::check::clear_cache", skip_all)]
pub async fn clear_cache_handler(app_state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
  let now = Utc::now();
  let buckets = app_state.rate_limiter.clear();
  let revocations = app_state.auth.tokens().revoked().prune(now.timestamp());
  info!(buckets, revocations, "Caches cleared.");
  respond(
    &req,
    StatusCode::OK,
    Ok(json!({
      "status": format!("Cache is cleared {}", now.format("%Y-%m-%d %H:%M:%S")),
      "rateLimitBuckets": buckets,
      "expiredRevocations": revocations,
    })),
  )
}
