// app/src/requests/customer_request.rs

use orderdesk::{Rule, ValidationErrors, Validator, WriteMode};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{CustomerChanges, CustomerDraft};

pub const CUSTOMER_BUSINESS_FIELDS: &[&str] = &["customerName"];

pub fn customer_validator(mode: WriteMode) -> Validator {
  Validator::new()
    .field("customerName", [Rule::Text, Rule::MaxLength(255)])
    .field("customerPhone", [Rule::Nullable, Rule::Text, Rule::MaxLength(64)])
    .field("customerEmail", [Rule::Nullable, Rule::Email, Rule::MaxLength(255)])
    .field("customerNote", [Rule::Nullable, Rule::Text])
    .message("customerName", "required", "Müştərinin adı qeyd edilməyib.")
    .for_mode(mode, CUSTOMER_BUSINESS_FIELDS)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCustomer {
  #[serde(rename = "customerName")]
  pub name: String,
  #[serde(rename = "customerPhone", default)]
  pub phone: Option<String>,
  #[serde(rename = "customerEmail", default)]
  pub email: Option<String>,
  #[serde(rename = "customerNote", default)]
  pub note: Option<String>,
}

impl NewCustomer {
  /// The owner always comes from the session, never from the body.
  pub fn into_draft(self, user_id: i64) -> CustomerDraft {
    CustomerDraft {
      user_id,
      name: self.name,
      phone: self.phone,
      email: self.email,
      note: self.note,
    }
  }
}

pub fn validate_new_customer(payload: &Value) -> Result<NewCustomer, ValidationErrors> {
  customer_validator(WriteMode::Create).validate(payload)?.into_dto()
}

pub fn validate_customer_changes(payload: &Value, mode: WriteMode) -> Result<CustomerChanges, ValidationErrors> {
  let mut changes: CustomerChanges = customer_validator(mode).validate(payload)?.into_dto()?;
  changes.replace = mode == WriteMode::Replace;
  Ok(changes)
}
