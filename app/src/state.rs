// app/src/state.rs
use crate::config::AppConfig;
use crate::repositories::{Repositories, StoreProbe};
use crate::services::{AuthService, CustomerService, OrderService, OtpService, TokenService};
use crate::web::rate_limit::RateLimiter;
use std::sync::Arc;

/// Shared by every actix worker; each field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub orders: OrderService,
  pub customers: CustomerService,
  pub auth: AuthService,
  pub otps: OtpService,
  pub rate_limiter: Arc<RateLimiter>,
  pub probe: StoreProbe,
}

impl AppState {
  pub fn new(config: Arc<AppConfig>, repositories: Repositories) -> Self {
    let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl_minutes);
    Self {
      orders: OrderService::new(repositories.orders.clone(), repositories.customers.clone()),
      customers: CustomerService::new(
        repositories.customers.clone(),
        repositories.customer_reports.clone(),
        config.enforce_ownership,
      ),
      auth: AuthService::new(repositories.users.clone(), tokens),
      otps: OtpService::new(repositories.otps.clone(), config.otp_ttl_minutes),
      rate_limiter: Arc::new(RateLimiter::per_minute(config.rate_limit_per_minute)),
      probe: repositories.probe,
      config,
    }
  }
}
