// app/src/models/user.rs

use chrono::{DateTime, Utc};
use orderdesk::{CoreError, ValidationErrors};
use serde::Serialize;
use sqlx::FromRow;

pub const EMAIL_TAKEN_MESSAGE: &str = "The email has already been taken.";

/// The error every path that hits an existing email answers with.
pub fn email_taken() -> CoreError {
  CoreError::Validation(ValidationErrors::single("email", EMAIL_TAKEN_MESSAGE))
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
  pub id: i64,
  pub name: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub password_hash: String,
}
