// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum CoreError {
  /// One or more request fields failed their rules. Carries the full
  /// field → messages map so the HTTP layer can render it verbatim.
  #[error("Validation failed for {} field(s)", .0.len())]
  Validation(ValidationErrors),

  #[error("{resource} not found with ID: {id}")]
  NotFound { resource: &'static str, id: i64 },

  #[error("Storage operation '{operation}' failed. Source: {source}")]
  Storage {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },
}

impl CoreError {
  /// Wraps a driver error raised while running `operation`.
  pub fn storage<E>(operation: &'static str, err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    CoreError::Storage {
      operation,
      source: AnyhowError::new(err),
    }
  }

  pub fn not_found(resource: &'static str, id: i64) -> Self {
    CoreError::NotFound { resource, id }
  }
}

impl From<ValidationErrors> for CoreError {
  fn from(errors: ValidationErrors) -> Self {
    CoreError::Validation(errors)
  }
}

pub type CoreResult<T, E = CoreError> = std::result::Result<T, E>;
