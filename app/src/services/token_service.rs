// app/src/services/token_service.rs

//! HS256 bearer tokens and the in-process revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// User id.
  pub sub: String,
  /// Token id, the revocation key.
  pub jti: String,
  pub iat: i64,
  pub exp: i64,
}

impl Claims {
  pub fn user_id(&self) -> Result<i64> {
    self.sub.parse().map_err(|_| AppError::unauthenticated())
  }
}

/// The `authorization` block handed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
  pub access_token: String,
  pub token_type: &'static str,
  /// Seconds.
  pub expires_in: i64,
}

/// Expired revocations are swept on insert once this many are held.
const REVOCATION_SWEEP_THRESHOLD: usize = 10_000;

/// Revoked token ids with the expiry of their token. Entries are useless
/// once the token would have expired anyway, so [`RevokedTokens::prune`]
/// drops them.
#[derive(Debug, Default)]
pub struct RevokedTokens {
  entries: Mutex<HashMap<String, i64>>,
}

impl RevokedTokens {
  pub fn revoke(&self, jti: &str, exp: i64) {
    self.revoke_at(jti, exp, Utc::now().timestamp());
  }

  pub fn revoke_at(&self, jti: &str, exp: i64, now: i64) {
    let mut entries = self.entries.lock();
    if entries.len() >= REVOCATION_SWEEP_THRESHOLD {
      let before = entries.len();
      entries.retain(|_, expires| *expires >= now);
      debug!(swept = before - entries.len(), "Swept expired revocations.");
    }
    entries.insert(jti.to_string(), exp);
  }

  pub fn is_revoked(&self, jti: &str) -> bool {
    self.entries.lock().contains_key(jti)
  }

  /// Removes entries whose token expired before `now`; returns how many.
  pub fn prune(&self, now: i64) -> usize {
    let mut entries = self.entries.lock();
    let before = entries.len();
    entries.retain(|_, exp| *exp >= now);
    before - entries.len()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[derive(Clone)]
pub struct TokenService {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl: Duration,
  revoked: Arc<RevokedTokens>,
}

impl TokenService {
  pub fn new(secret: &str, ttl_minutes: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl: Duration::minutes(ttl_minutes.max(1)),
      revoked: Arc::new(RevokedTokens::default()),
    }
  }

  pub fn revoked(&self) -> &RevokedTokens {
    &self.revoked
  }

  pub fn issue(&self, user_id: i64) -> Result<IssuedToken> {
    let now = Utc::now();
    let claims = Claims {
      sub: user_id.to_string(),
      jti: Uuid::new_v4().to_string(),
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
      error!(error = %e, "Failed to sign access token.");
      AppError::Internal(format!("Token signing failed: {}", e))
    })?;
    Ok(IssuedToken {
      access_token,
      token_type: "Bearer",
      expires_in: self.ttl.num_seconds(),
    })
  }

  /// Checks signature, expiry and revocation.
  pub fn verify(&self, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256)).map_err(|e| {
      debug!(error = %e, "Rejected bearer token.");
      AppError::unauthenticated()
    })?;
    if self.revoked.is_revoked(&data.claims.jti) {
      debug!(jti = %data.claims.jti, "Rejected revoked bearer token.");
      return Err(AppError::Auth("Token has been revoked.".to_string()));
    }
    Ok(data.claims)
  }

  pub fn revoke(&self, claims: &Claims) {
    self.revoked.revoke(&claims.jti, claims.exp);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn issued_token_verifies_until_revoked() {
    let tokens = TokenService::new("test-secret", 60);
    let issued = tokens.issue(42).unwrap();
    assert_eq!(issued.expires_in, 3600);

    let claims = tokens.verify(&issued.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), 42);

    tokens.revoke(&claims);
    assert!(matches!(tokens.verify(&issued.access_token), Err(AppError::Auth(_))));
  }

  #[test]
  fn token_from_other_secret_is_rejected() {
    let issued = TokenService::new("one", 60).issue(1).unwrap();
    assert!(TokenService::new("two", 60).verify(&issued.access_token).is_err());
  }

  #[test]
  fn prune_drops_only_expired_entries() {
    let revoked = RevokedTokens::default();
    revoked.revoke("old", 100);
    revoked.revoke("new", 300);
    assert_eq!(revoked.prune(200), 1);
    assert!(revoked.is_revoked("new"));
    assert!(!revoked.is_revoked("old"));
  }

  #[test]
  fn revoke_sweeps_expired_entries_past_threshold() {
    let revoked = RevokedTokens::default();
    for n in 0..REVOCATION_SWEEP_THRESHOLD - 1 {
      revoked.revoke_at(&format!("expired-{n}"), 100, 50);
    }
    revoked.revoke_at("live", 10_000, 50);
    assert_eq!(revoked.len(), REVOCATION_SWEEP_THRESHOLD);

    revoked.revoke_at("fresh", 10_000, 500);
    assert_eq!(revoked.len(), 2);
    assert!(revoked.is_revoked("live"));
    assert!(revoked.is_revoked("fresh"));
    assert!(!revoked.is_revoked("expired-0"));
  }
}
