// app/src/web/envelope.rs

//! The uniform response envelope:
//! `{timestamp, path, method, error, result}`.
//!
//! Successful responses carry `error: ""`; failures carry `result: []` and
//! either a message or, for validation failures, a field → messages map.

use actix_web::{
  error::{InternalError, JsonPayloadError, PathError},
  http::StatusCode,
  HttpRequest, HttpResponse, ResponseError,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::errors::{AppError, Result};

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
  pub timestamp: String,
  pub path: String,
  pub method: String,
  pub error: Value,
  pub result: T,
}

impl<T: Serialize> Envelope<T> {
  fn new(req: &HttpRequest, error: Value, result: T) -> Self {
    Self {
      timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
      path: req.path().to_string(),
      method: req.method().to_string(),
      error,
      result,
    }
  }
}

pub fn success<T: Serialize>(req: &HttpRequest, status: StatusCode, result: T) -> HttpResponse {
  HttpResponse::build(status).json(Envelope::new(req, Value::String(String::new()), result))
}

pub fn failure(req: &HttpRequest, err: &AppError) -> HttpResponse {
  if err.is_server_error() {
    error!(path = %req.path(), method = %req.method(), application_error = %err, "Request failed.");
  } else {
    debug!(path = %req.path(), status = %err.status_code(), error = %err, "Request rejected.");
  }
  HttpResponse::build(err.status_code()).json(Envelope::new(req, err.public_error(), json!([])))
}

/// Renders a handler outcome with `status` on success.
pub fn respond<T: Serialize>(req: &HttpRequest, status: StatusCode, outcome: Result<T>) -> HttpResponse {
  match outcome {
    Ok(result) => success(req, status, result),
    Err(err) => failure(req, &err),
  }
}

/// `204 No Content` on success, the usual failure envelope otherwise.
pub fn respond_no_content(req: &HttpRequest, outcome: Result<()>) -> HttpResponse {
  match outcome {
    Ok(()) => HttpResponse::NoContent().finish(),
    Err(err) => failure(req, &err),
  }
}

/// Turns an extraction failure into an actix error whose response is the
/// failure envelope.
pub fn reject(req: &HttpRequest, err: AppError) -> actix_web::Error {
  let response = failure(req, &err);
  InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  reject(
    req,
    AppError::validation("body", format!("The request body could not be read: {}", err)),
  )
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
  debug!(error = %err, "Path parameter rejected.");
  reject(req, AppError::NotFound("Route not found.".to_string()))
}

/// Default service for unmatched routes.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
  failure(
    &req,
    &AppError::NotFound(format!("The route {} could not be found.", req.path())),
  )
}
