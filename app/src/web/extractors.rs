// app/src/web/extractors.rs

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use super::envelope;
use crate::errors::AppError;
use crate::services::Claims;
use crate::state::AppState;

/// The caller behind a valid, unrevoked bearer token.
///
/// Taking it as a handler argument is what makes a route authenticated;
/// rejection renders a 401 envelope.
#[derive(Debug, Clone)]
pub struct AuthSession {
  pub user_id: i64,
  pub claims: Claims,
}

impl AuthSession {
  fn from_http(req: &HttpRequest) -> Result<Self, AppError> {
    let state = req
      .app_data::<web::Data<AppState>>()
      .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;

    let token = req
      .headers()
      .get(AUTHORIZATION)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| value.strip_prefix("Bearer "))
      .map(str::trim)
      .filter(|token| !token.is_empty())
      .ok_or_else(AppError::unauthenticated)?;

    let claims = state.auth.tokens().verify(token)?;
    Ok(Self {
      user_id: claims.user_id()?,
      claims,
    })
  }
}

impl FromRequest for AuthSession {
  type Error = actix_web::Error;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(Self::from_http(req).map_err(|err| envelope::reject(req, err)))
  }
}
