// app/src/services/auth_service.rs

//! Password hashing and the account flows built on it: register, login,
//! profile, token refresh and logout.

use crate::errors::{AppError, Result};
use crate::models::{email_taken, NewUser, User};
use crate::repositories::UserRepository;
use crate::requests::auth_request::{LoginRequest, RegisterRequest};
use crate::services::token_service::{Claims, IssuedToken, TokenService};
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub use crate::models::EMAIL_TAKEN_MESSAGE;
pub const UNKNOWN_EMAIL_MESSAGE: &str = "No user found with this email address.";
pub const WRONG_PASSWORD_MESSAGE: &str = "Incorrect password.";

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::validation("password", "The password field is required."));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash
/// itself is unusable.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display), fields(hash_len = hashed_password_str.len()))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

#[derive(Clone)]
pub struct AuthService {
  users: Arc<dyn UserRepository>,
  tokens: TokenService,
}

impl AuthService {
  pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
    Self { users, tokens }
  }

  pub fn tokens(&self) -> &TokenService {
    &self.tokens
  }

  #[instrument(name = "auth_service::register", skip_all, fields(email = %request.email))]
  pub async fn register(&self, request: RegisterRequest) -> Result<(User, IssuedToken)> {
    if self.users.find_by_email(&request.email).await?.is_some() {
      warn!("Registration rejected: email already in use.");
      return Err(email_taken().into());
    }

    let password_hash = hash_password(&request.password)?;
    let user = self
      .users
      .create(NewUser {
        name: request.name,
        email: request.email,
        password_hash,
      })
      .await?;
    let token = self.tokens.issue(user.id)?;
    info!(user_id = user.id, "User registered.");
    Ok((user, token))
  }

  #[instrument(name = "auth_service::login", skip_all, fields(email = %request.email))]
  pub async fn login(&self, request: LoginRequest) -> Result<IssuedToken> {
    let user = self
      .users
      .find_by_email(&request.email)
      .await?
      .ok_or_else(|| AppError::NotFound(UNKNOWN_EMAIL_MESSAGE.to_string()))?;

    if !verify_password(&user.password_hash, &request.password)? {
      warn!(user_id = user.id, "Login rejected: wrong password.");
      return Err(AppError::Auth(WRONG_PASSWORD_MESSAGE.to_string()));
    }

    info!(user_id = user.id, "User logged in.");
    self.tokens.issue(user.id)
  }

  pub async fn me(&self, user_id: i64) -> Result<User> {
    self.users.find(user_id).await?.ok_or_else(AppError::unauthenticated)
  }

  #[instrument(name = "auth_service::update_name", skip(self, name))]
  pub async fn update_name(&self, user_id: i64, name: &str) -> Result<User> {
    self
      .users
      .update_name(user_id, name)
      .await?
      .ok_or_else(AppError::unauthenticated)
  }

  /// Issues a replacement token first, then revokes the presented one.
  #[instrument(name = "auth_service::refresh", skip_all, fields(user_id = %claims.sub))]
  pub fn refresh(&self, claims: &Claims) -> Result<IssuedToken> {
    let fresh = self.tokens.issue(claims.user_id()?)?;
    self.tokens.revoke(claims);
    Ok(fresh)
  }

  pub fn logout(&self, claims: &Claims) {
    self.tokens.revoke(claims);
    info!(user_id = %claims.sub, "User logged out.");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("secret-pw").unwrap();
    assert!(verify_password(&hash, "secret-pw").unwrap());
    assert!(!verify_password(&hash, "other-pw").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn malformed_stored_hash_is_an_internal_error() {
    assert!(matches!(verify_password("not-a-hash", "pw"), Err(AppError::Internal(_))));
  }
}
