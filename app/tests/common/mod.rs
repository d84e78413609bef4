// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use actix_http::Request;
use actix_web::{
  dev::{Service, ServiceResponse},
  http::{header, StatusCode},
  test, web, App,
};
use once_cell::sync::Lazy;
use orderdesk_app::{repositories::Repositories, web::configure_app_routes, AppConfig, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Level;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "secret123";

pub fn test_config() -> AppConfig {
  AppConfig::in_memory(TEST_SECRET)
}

/// A fully routed service over fresh in-memory repositories.
pub async fn spawn_app(config: AppConfig) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
  setup_tracing();
  let state = AppState::new(Arc::new(config), Repositories::memory());
  test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await
}

/// Sends `req` and returns the status plus the decoded body
/// (`Value::Null` for an empty body).
pub async fn send<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
  S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
  let response = test::call_service(app, req.to_request()).await;
  let status = response.status();
  let bytes = test::read_body(response).await;
  let body = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).expect("response body is JSON")
  };
  (status, body)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
  (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers `email` and returns its access token.
pub async fn register<S>(app: &S, name: &str, email: &str) -> String
where
  S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
  let (status, body) = send(
    app,
    test::TestRequest::post()
      .uri("/v1/auth/register")
      .set_json(json!({ "name": name, "email": email, "password": TEST_PASSWORD })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
  body["result"]["authorization"]["access_token"]
    .as_str()
    .expect("access token in register response")
    .to_string()
}

/// Creates a customer owned by the token's user and returns its id.
pub async fn create_customer<S>(app: &S, token: &str, name: &str) -> i64
where
  S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
  let (status, body) = send(
    app,
    test::TestRequest::post()
      .uri("/v1/tasks")
      .insert_header(bearer(token))
      .set_json(json!({ "customerName": name, "customerPhone": "+994501234567" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "customer create failed: {}", body);
  body["result"]["data"]["customerId"].as_i64().expect("customer id")
}

pub fn order_payload(customer_id: i64, brand: &str) -> Value {
  json!({
    "customerId": customer_id,
    "orderBrand": brand,
    "orderDate": "2024-01-30",
    "orderPrice": 199.99,
    "orderStatus": 1,
  })
}

/// Creates an order and returns its id.
pub async fn create_order<S>(app: &S, customer_id: i64, brand: &str) -> i64
where
  S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
  let (status, body) = send(
    app,
    test::TestRequest::post()
      .uri("/v1/orders")
      .set_json(order_payload(customer_id, brand)),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "order create failed: {}", body);
  body["result"]["data"]["orderId"].as_i64().expect("order id")
}

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
