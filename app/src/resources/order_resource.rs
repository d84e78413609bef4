// app/src/resources/order_resource.rs

use orderdesk::{LabeledEnum, LabeledValue, DATE_FORMAT};
use rust_decimal::Decimal;
use serde::Serialize;

use super::timestamp;
use crate::models::{Order, OrderStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResource {
  pub order_id: i64,
  pub customer_id: i64,
  pub order_brand: String,
  pub order_date: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub order_price: Decimal,
  /// Unknown stored values render as `Order`.
  pub order_status: LabeledValue,
  /// Unknown or missing stored values render as `null`.
  pub order_status_old: Option<LabeledValue>,
  pub order_note: Option<String>,
  pub order_created_at: String,
  pub order_updated_at: String,
}

impl From<&Order> for OrderResource {
  fn from(order: &Order) -> Self {
    Self {
      order_id: order.id,
      customer_id: order.customer_id,
      order_brand: order.brand.clone(),
      order_date: order.date.format(DATE_FORMAT).to_string(),
      order_price: order.price,
      order_status: OrderStatus::resolve(Some(i64::from(order.status)), Some(OrderStatus::Order))
        .unwrap_or_else(|| OrderStatus::Order.labeled()),
      order_status_old: OrderStatus::resolve(order.status_old.map(i64::from), None),
      order_note: order.note.clone(),
      order_created_at: timestamp(&order.created_at),
      order_updated_at: timestamp(&order.updated_at),
    }
  }
}

impl From<Order> for OrderResource {
  fn from(order: Order) -> Self {
    Self::from(&order)
  }
}
