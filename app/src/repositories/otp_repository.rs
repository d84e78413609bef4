// app/src/repositories/otp_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderdesk::{CoreError, CoreResult};
use parking_lot::Mutex;
use sqlx::PgPool;
use tracing::instrument;

use super::OtpRepository;
use crate::models::Otp;

const OTP_COLUMNS: &str = "id, email, otp, expires_at, is_used, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgOtpRepository {
  pool: PgPool,
}

impl PgOtpRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OtpRepository for PgOtpRepository {
  #[instrument(name = "pg_otps::insert", skip(self, code))]
  async fn insert(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> CoreResult<Otp> {
    sqlx::query_as::<_, Otp>(&format!(
      "INSERT INTO otps (email, otp, expires_at) VALUES ($1, $2, $3) RETURNING {}",
      OTP_COLUMNS
    ))
    .bind(email)
    .bind(code)
    .bind(expires_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| CoreError::storage("otps.insert", e))
  }

  /// One statement: the newest usable match is locked, marked used and
  /// returned. Concurrent verifications of the same code skip the locked row.
  #[instrument(name = "pg_otps::consume", skip(self, code))]
  async fn consume(&self, email: &str, code: &str, now: DateTime<Utc>) -> CoreResult<Option<Otp>> {
    sqlx::query_as::<_, Otp>(&format!(
      "UPDATE otps SET is_used = TRUE, updated_at = NOW() \
       WHERE id = ( \
         SELECT id FROM otps \
         WHERE email = $1 AND otp = $2 AND is_used = FALSE AND expires_at > $3 \
         ORDER BY created_at DESC, id DESC LIMIT 1 \
         FOR UPDATE SKIP LOCKED \
       ) RETURNING {}",
      OTP_COLUMNS
    ))
    .bind(email)
    .bind(code)
    .bind(now)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| CoreError::storage("otps.consume", e))
  }
}

#[derive(Debug, Default)]
pub struct MemoryOtpRepository {
  rows: Mutex<Vec<Otp>>,
}

impl MemoryOtpRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl OtpRepository for MemoryOtpRepository {
  async fn insert(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> CoreResult<Otp> {
    let mut rows = self.rows.lock();
    let now = Utc::now();
    let otp = Otp {
      id: rows.last().map_or(1, |o| o.id + 1),
      email: email.to_string(),
      otp: code.to_string(),
      expires_at,
      is_used: false,
      created_at: now,
      updated_at: now,
    };
    rows.push(otp.clone());
    Ok(otp)
  }

  async fn consume(&self, email: &str, code: &str, now: DateTime<Utc>) -> CoreResult<Option<Otp>> {
    let mut rows = self.rows.lock();
    // Newest first: later rows have higher ids.
    let Some(row) = rows
      .iter_mut()
      .rev()
      .find(|o| o.email == email && o.otp == code && o.is_usable(now))
    else {
      return Ok(None);
    };
    row.is_used = true;
    row.updated_at = now;
    Ok(Some(row.clone()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[tokio::test]
  async fn memory_consume_is_single_use_and_respects_expiry() {
    let repo = MemoryOtpRepository::new();
    let now = Utc::now();
    repo.insert("a@b.az", "012345", now + Duration::minutes(5)).await.unwrap();
    repo.insert("a@b.az", "999999", now - Duration::seconds(1)).await.unwrap();

    assert!(repo.consume("a@b.az", "012345", now).await.unwrap().is_some());
    assert!(repo.consume("a@b.az", "012345", now).await.unwrap().is_none());
    assert!(repo.consume("a@b.az", "999999", now).await.unwrap().is_none());
    assert!(repo.consume("x@b.az", "012345", now).await.unwrap().is_none());
  }
}
