// app/src/requests/mod.rs

//! Request validators and the typed payloads they produce.
//!
//! Rule checks happen here; checks that need the store (customer exists,
//! email unique) are added by the services into the same error map.

pub mod auth_request;
pub mod customer_request;
pub mod order_request;

use serde_json::Value;

use crate::errors::AppError;

/// Parses a raw request body. An empty body reads as `null`, which the
/// validators treat like `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Null);
  }
  serde_json::from_slice(bytes)
    .map_err(|e| AppError::validation("body", format!("The request body is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_body_is_null_and_garbage_is_a_validation_error() {
    assert_eq!(parse_body(b"").unwrap(), Value::Null);
    assert_eq!(parse_body(b"  \n").unwrap(), Value::Null);
    assert!(matches!(parse_body(b"{oops"), Err(AppError::Core(_))));
  }
}
