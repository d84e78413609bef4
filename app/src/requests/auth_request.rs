// app/src/requests/auth_request.rs

use orderdesk::{Rule, ValidationErrors, Validator};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
  pub name: String,
  pub email: String,
  pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMeRequest {
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateOtpRequest {
  pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
  pub email: String,
  pub otp: String,
}

pub fn validate_register(payload: &Value) -> Result<RegisterRequest, ValidationErrors> {
  Validator::new()
    .field("name", [Rule::Required, Rule::Text, Rule::MaxLength(255)])
    .field("email", [Rule::Required, Rule::Email, Rule::MaxLength(255)])
    .field("password", [Rule::Required, Rule::Text, Rule::MinLength(6)])
    .validate(payload)?
    .into_dto()
}

pub fn validate_login(payload: &Value) -> Result<LoginRequest, ValidationErrors> {
  Validator::new()
    .field("email", [Rule::Required, Rule::Email])
    .field("password", [Rule::Required, Rule::Text])
    .validate(payload)?
    .into_dto()
}

pub fn validate_update_me(payload: &Value) -> Result<UpdateMeRequest, ValidationErrors> {
  Validator::new()
    .field("name", [Rule::Required, Rule::Text, Rule::MaxLength(255)])
    .validate(payload)?
    .into_dto()
}

pub fn validate_generate_otp(payload: &Value) -> Result<GenerateOtpRequest, ValidationErrors> {
  Validator::new()
    .field("email", [Rule::Required, Rule::Email])
    .validate(payload)?
    .into_dto()
}

pub fn validate_verify_otp(payload: &Value) -> Result<VerifyOtpRequest, ValidationErrors> {
  Validator::new()
    .field("email", [Rule::Required, Rule::Email])
    .field("otp", [Rule::Required, Rule::Text, Rule::Size(6)])
    .validate(payload)?
    .into_dto()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn register_enforces_password_length() {
    let errors = validate_register(&json!({ "name": "A", "email": "a@b.az", "password": "12345" })).unwrap_err();
    assert!(errors.has("password"));
    assert!(!errors.has("email"));
  }

  #[test]
  fn verify_otp_needs_exactly_six_characters() {
    assert!(validate_verify_otp(&json!({ "email": "a@b.az", "otp": "12345" })).is_err());
    assert!(validate_verify_otp(&json!({ "email": "a@b.az", "otp": 123456 })).is_err());
    assert!(validate_verify_otp(&json!({ "email": "a@b.az", "otp": "012345" })).is_ok());
  }
}
