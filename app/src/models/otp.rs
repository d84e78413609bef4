// app/src/models/otp.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A one-time passcode. Usable once, and only before `expires_at`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Otp {
  pub id: i64,
  pub email: String,
  pub otp: String,
  pub expires_at: DateTime<Utc>,
  pub is_used: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Otp {
  pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
    !self.is_used && self.expires_at > now
  }
}
