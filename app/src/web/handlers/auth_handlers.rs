// app/src/web/handlers/auth_handlers.rs

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::requests::auth_request::{
  validate_generate_otp, validate_login, validate_register, validate_update_me, validate_verify_otp,
};
use crate::requests::parse_body;
use crate::resources::UserResource;
use crate::state::AppState;
use crate::web::envelope::respond;
use crate::web::extractors::AuthSession;

pub const INVALID_OTP_MESSAGE: &str = "Invalid or expired OTP";

#[instrument(name = "handler::register", skip_all)]
pub async fn register_handler(app_state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
  let outcome = async {
    let request = validate_register(&parse_body(&body)?)?;
    let (user, token) = app_state.auth.register(request).await?;
    Ok::<_, AppError>(json!({
      "user": UserResource::from(&user),
      "authorization": token,
    }))
  }
  .await;
  respond(&req, StatusCode::CREATED, outcome)
}

#[instrument(name = "handler::login", skip_all)]
pub async fn login_handler(app_state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
  let outcome = async {
    let request = validate_login(&parse_body(&body)?)?;
    Ok::<_, AppError>(app_state.auth.login(request).await?)
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

#[instrument(name = "handler::me", skip_all, fields(user_id = session.user_id))]
pub async fn me_handler(app_state: web::Data<AppState>, req: HttpRequest, session: AuthSession) -> HttpResponse {
  let outcome = app_state
    .auth
    .me(session.user_id)
    .await
    .map(|user| UserResource::from(&user));
  respond(&req, StatusCode::OK, outcome)
}

/// Only the display name can be changed here.
#[instrument(name = "handler::update_me", skip_all, fields(user_id = session.user_id))]
pub async fn update_me_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  session: AuthSession,
  body: web::Bytes,
) -> HttpResponse {
  let outcome = async {
    let request = validate_update_me(&parse_body(&body)?)?;
    let user = app_state.auth.update_name(session.user_id, &request.name).await?;
    Ok::<_, AppError>(json!({ "user": UserResource::from(&user) }))
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

#[instrument(name = "handler::refresh", skip_all, fields(user_id = session.user_id))]
pub async fn refresh_handler(app_state: web::Data<AppState>, req: HttpRequest, session: AuthSession) -> HttpResponse {
  respond(&req, StatusCode::OK, app_state.auth.refresh(&session.claims))
}

#[instrument(name = "handler::logout", skip_all, fields(user_id = session.user_id))]
pub async fn logout_handler(app_state: web::Data<AppState>, req: HttpRequest, session: AuthSession) -> HttpResponse {
  app_state.auth.logout(&session.claims);
  respond(&req, StatusCode::OK, Ok("Successfully logged out"))
}

/// The code is returned in the body; there is no mail delivery.
#[instrument(name = "handler::generate_otp", skip_all)]
pub async fn generate_otp_handler(app_state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
  let outcome = async {
    let request = validate_generate_otp(&parse_body(&body)?)?;
    let otp = app_state.otps.generate(&request.email).await?;
    info!(email = %request.email, "OTP generated.");
    Ok::<_, AppError>(json!({
      "message": "OTP has been generated successfully",
      "otp": otp.otp,
    }))
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}

#[instrument(name = "handler::verify_otp", skip_all)]
pub async fn verify_otp_handler(app_state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
  let outcome = async {
    let request = validate_verify_otp(&parse_body(&body)?)?;
    if !app_state.otps.verify(&request.email, &request.otp).await? {
      return Err(AppError::BadRequest(INVALID_OTP_MESSAGE.to_string()));
    }
    Ok::<_, AppError>("OTP verified successfully")
  }
  .await;
  respond(&req, StatusCode::OK, outcome)
}
