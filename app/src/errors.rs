// app/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use orderdesk::{CoreError, ValidationErrors};
use serde_json::{json, Value};
use thiserror::Error;

/// Message shown to clients for every 5xx; details only go to the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Core(#[from] CoreError),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("{0}")]
  Auth(String),

  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("Too many requests. Please slow down.")]
  TooManyRequests,

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ValidationErrors> for AppError {
  fn from(errors: ValidationErrors) -> Self {
    AppError::Core(CoreError::Validation(errors))
  }
}

impl AppError {
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    ValidationErrors::single(field, message).into()
  }

  pub fn unauthenticated() -> Self {
    AppError::Auth("Unauthenticated.".to_string())
  }

  pub fn is_server_error(&self) -> bool {
    self.status_code().is_server_error()
  }

  /// The `error` member of the response envelope: a field map for
  /// validation failures, otherwise a message string.
  pub fn public_error(&self) -> Value {
    match self {
      AppError::Core(CoreError::Validation(errors)) => json!(errors),
      _ if self.is_server_error() => Value::String(INTERNAL_ERROR_MESSAGE.to_string()),
      other => Value::String(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Core(CoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Core(CoreError::NotFound { .. }) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
      AppError::Core(CoreError::Storage { .. })
      | AppError::Sqlx(_)
      | AppError::Config(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    if self.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    }
    HttpResponse::build(self.status_code()).json(json!({ "error": self.public_error(), "result": [] }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn server_errors_hide_details() {
    let err = AppError::Internal("connection reset by peer".to_string());
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.public_error(), json!(INTERNAL_ERROR_MESSAGE));
  }

  #[test]
  fn validation_errors_render_as_field_map() {
    let err = AppError::validation("orderPrice", "The order price field must be a number.");
    assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
      err.public_error(),
      json!({ "orderPrice": ["The order price field must be a number."] })
    );
  }

  #[test]
  fn not_found_keeps_resource_message() {
    let err: AppError = CoreError::not_found("Order", 7).into();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(err.public_error(), json!("Order not found with ID: 7"));
  }
}
