// app/src/services/mod.rs

pub mod auth_service;
pub mod customer_service;
pub mod order_service;
pub mod otp_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use customer_service::CustomerService;
pub use order_service::OrderService;
pub use otp_service::OtpService;
pub use token_service::{Claims, IssuedToken, RevokedTokens, TokenService};
