// app/src/requests/order_request.rs

use chrono::NaiveDate;
use orderdesk::{LabeledEnum, Rule, ValidationErrors, Validator, WriteMode, DATE_FORMAT};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{OrderChanges, OrderDraft, OrderStatus};

/// Mandatory on create and on full replacement.
pub const ORDER_BUSINESS_FIELDS: &[&str] = &["customerId", "orderBrand", "orderDate", "orderPrice", "orderStatus"];

/// `status_old` of a new order when the client does not send one.
pub const DEFAULT_STATUS_OLD: i32 = 1;

pub const CUSTOMER_MISSING_MESSAGE: &str = "Müştəri nömrəsi düzgün qeyd edilməyib.";

fn status_choices() -> String {
  OrderStatus::TABLE
    .iter()
    .map(|(_, value, label)| format!("{} - {}", value, label))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn order_validator(mode: WriteMode) -> Validator {
  let statuses = OrderStatus::values();
  let numbers = statuses.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
  let status_in = format!("Sifarişin statusu yalnızca aşağıdakılardan biri ola bilər: {}", status_choices());
  let status_integer = format!("Sifarişin statusu yalnızca aşağıdakılardan biri ola bilər: {}", numbers);

  Validator::new()
    .field("customerId", [Rule::Integer])
    .field("orderBrand", [Rule::Text, Rule::MaxLength(255)])
    .field("orderDate", [Rule::Date(DATE_FORMAT)])
    .field("orderPrice", [Rule::Numeric, Rule::Gte(0.0)])
    .field("orderStatus", [Rule::Integer, Rule::In(statuses.clone())])
    .field("orderStatusOld", [Rule::Nullable, Rule::Integer, Rule::In(statuses)])
    .field("orderNote", [Rule::Nullable, Rule::Text])
    .message("customerId", "required", "Müştəri nömrəsi qeyd edilməyib.")
    .message(
      "orderDate",
      "required",
      "Sifarin tarixi il-ay-gün (2024-01-01) formatına uyğun deyil.",
    )
    .message(
      "orderDate",
      "date_format",
      "Sifarin tarixi il-ay-gün (2024-01-01) formatına uyğun deyil.",
    )
    .message("orderPrice", "required", "Sifarişin qiyməti qeyd edilməyib.")
    .message("orderPrice", "numeric", "Sifarişin qiyməti rəqəmlə qeyd edilməyib.")
    .message("orderBrand", "required", "Sifarişin Brendi qeyd edilməyib.")
    .message("orderStatus", "required", "Sifarişin statusu qeyd edilməlidir.")
    .message("orderStatus", "integer", status_integer.clone())
    .message("orderStatus", "in", status_in.clone())
    .message("orderStatusOld", "integer", status_integer)
    .message("orderStatusOld", "in", status_in)
    .for_mode(mode, ORDER_BUSINESS_FIELDS)
}

/// A validated create payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewOrder {
  #[serde(rename = "customerId")]
  pub customer_id: i64,
  #[serde(rename = "orderBrand")]
  pub brand: String,
  #[serde(rename = "orderDate")]
  pub date: NaiveDate,
  #[serde(rename = "orderPrice")]
  pub price: Decimal,
  #[serde(rename = "orderStatus")]
  pub status: i32,
  #[serde(rename = "orderStatusOld", default)]
  pub status_old: Option<i32>,
  #[serde(rename = "orderNote", default)]
  pub note: Option<String>,
}

impl NewOrder {
  pub fn into_draft(self) -> OrderDraft {
    OrderDraft {
      customer_id: self.customer_id,
      brand: self.brand,
      date: self.date,
      price: self.price,
      status: self.status,
      status_old: Some(self.status_old.unwrap_or(DEFAULT_STATUS_OLD)),
      note: self.note,
    }
  }
}

pub fn validate_new_order(payload: &Value) -> Result<NewOrder, ValidationErrors> {
  order_validator(WriteMode::Create).validate(payload)?.into_dto()
}

/// Validates a PUT (`Replace`) or PATCH body. Only present, non-null fields
/// end up in the returned changes.
pub fn validate_order_changes(payload: &Value, mode: WriteMode) -> Result<OrderChanges, ValidationErrors> {
  let mut changes: OrderChanges = order_validator(mode).validate(payload)?.into_dto()?;
  changes.replace = mode == WriteMode::Replace;
  Ok(changes)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn full_body() -> Value {
    json!({
      "customerId": 5,
      "orderBrand": "Nike",
      "orderDate": "2024-01-30",
      "orderPrice": 199.99,
      "orderStatus": 1
    })
  }

  #[test]
  fn create_defaults_status_old_to_one() {
    let draft = validate_new_order(&full_body()).unwrap().into_draft();
    assert_eq!(draft.status_old, Some(1));
    assert_eq!(draft.price, Decimal::new(19999, 2));
  }

  #[test]
  fn create_requires_every_business_field() {
    let errors = validate_new_order(&json!({ "orderBrand": "Nike" })).unwrap_err();
    for field in ["customerId", "orderDate", "orderPrice", "orderStatus"] {
      assert!(errors.has(field), "missing error for {field}");
    }
    assert_eq!(
      errors.get("orderPrice").unwrap(),
      &["Sifarişin qiyməti qeyd edilməyib.".to_string()]
    );
  }

  #[test]
  fn create_rejects_unknown_status_and_bad_date() {
    let mut body = full_body();
    body["orderStatus"] = json!(9);
    body["orderDate"] = json!("30/01/2024");
    let errors = validate_new_order(&body).unwrap_err();
    assert!(errors.get("orderStatus").unwrap()[0].contains("1 - Sifariş"));
    assert!(errors.has("orderDate"));
  }

  #[test]
  fn patch_accepts_empty_body_and_single_field() {
    assert_eq!(
      validate_order_changes(&json!({}), WriteMode::Patch).unwrap(),
      OrderChanges::default()
    );
    let changes = validate_order_changes(&json!({ "orderStatus": "2" }), WriteMode::Patch).unwrap();
    assert_eq!(changes.status, Some(2));
    assert_eq!(changes.brand, None);
  }

  #[test]
  fn replace_requires_business_fields_but_not_note() {
    let errors = validate_order_changes(&json!({ "orderNote": "x" }), WriteMode::Replace).unwrap_err();
    assert!(errors.has("orderBrand"));
    assert!(!errors.has("orderNote"));
    let changes = validate_order_changes(&full_body(), WriteMode::Replace).unwrap();
    assert!(changes.replace);
    assert_eq!(changes.note, None);
    assert!(!validate_order_changes(&full_body(), WriteMode::Patch).unwrap().replace);
  }

  #[test]
  fn negative_price_is_rejected() {
    let mut body = full_body();
    body["orderPrice"] = json!(-1);
    assert!(validate_new_order(&body).unwrap_err().has("orderPrice"));
  }
}
