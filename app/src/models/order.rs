// app/src/models/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use orderdesk::{
  FilterField, FilterOperator, FilterSpec, FilterValue, Filterable, LabeledEnum, Record, ValueKind,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Where an order currently is. Stored as a plain integer; any status may
/// follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
  Order,
  Production,
  OnTheRoad,
  Port,
  InBaku,
  Delivered,
}

impl LabeledEnum for OrderStatus {
  const TABLE: &'static [(Self, i64, &'static str)] = &[
    (OrderStatus::Order, 1, "Sifariş"),
    (OrderStatus::Production, 2, "İstehsal"),
    (OrderStatus::OnTheRoad, 3, "Yolda"),
    (OrderStatus::Port, 4, "Liman"),
    (OrderStatus::InBaku, 5, "Bakıda"),
    (OrderStatus::Delivered, 6, "Təhvil verildi"),
  ];
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: i64,
  pub customer_id: i64,
  pub brand: String,
  pub date: NaiveDate,
  pub price: Decimal,
  pub status: i32,
  pub status_old: Option<i32>,
  pub note: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Every writable column of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
  pub customer_id: i64,
  pub brand: String,
  pub date: NaiveDate,
  pub price: Decimal,
  pub status: i32,
  pub status_old: Option<i32>,
  pub note: Option<String>,
}

/// Fields present in a PUT or PATCH body. `status_old` is never taken from
/// the client on update; it is always the status held before the write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderChanges {
  /// Set for PUT. Optional columns absent from the body are cleared instead
  /// of kept.
  #[serde(skip)]
  pub replace: bool,
  #[serde(rename = "customerId")]
  pub customer_id: Option<i64>,
  #[serde(rename = "orderBrand")]
  pub brand: Option<String>,
  #[serde(rename = "orderDate")]
  pub date: Option<NaiveDate>,
  #[serde(rename = "orderPrice")]
  pub price: Option<Decimal>,
  #[serde(rename = "orderStatus")]
  pub status: Option<i32>,
  #[serde(rename = "orderNote")]
  pub note: Option<String>,
}

pub static ORDER_FILTERS: FilterSpec = FilterSpec::new(
  "orders",
  &[
    FilterField::new("orderId", "id", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("customerId", "customer_id", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("orderBrand", "brand", ValueKind::Text, FilterOperator::SUBSTRING),
    FilterField::new("orderDate", "date", ValueKind::Date, FilterOperator::COMPARISON),
    FilterField::new("orderPrice", "price", ValueKind::Decimal, FilterOperator::COMPARISON),
    FilterField::new("orderStatus", "status", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("orderStatusOld", "status_old", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("orderNote", "note", ValueKind::Text, FilterOperator::EQUALITY),
  ],
);

impl Filterable for Order {
  fn filter_value(&self, column: &str) -> Option<FilterValue> {
    match column {
      "id" => Some(self.id.into()),
      "customer_id" => Some(self.customer_id.into()),
      "brand" => Some(self.brand.as_str().into()),
      "date" => Some(self.date.into()),
      "price" => Some(self.price.into()),
      "status" => Some(i64::from(self.status).into()),
      "status_old" => self.status_old.map(|s| i64::from(s).into()),
      "note" => self.note.as_deref().map(FilterValue::from),
      _ => None,
    }
  }
}

impl Record for Order {
  type Draft = OrderDraft;
  type Changes = OrderChanges;
  const RESOURCE: &'static str = "Order";

  fn id(&self) -> i64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn materialize(id: i64, draft: OrderDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
    Order {
      id,
      customer_id: draft.customer_id,
      brand: draft.brand,
      date: draft.date,
      price: draft.price,
      status: draft.status,
      status_old: draft.status_old,
      note: draft.note,
      created_at,
      updated_at,
    }
  }

  fn merge(&self, changes: &OrderChanges) -> OrderDraft {
    OrderDraft {
      customer_id: changes.customer_id.unwrap_or(self.customer_id),
      brand: changes.brand.clone().unwrap_or_else(|| self.brand.clone()),
      date: changes.date.unwrap_or(self.date),
      price: changes.price.unwrap_or(self.price),
      status: changes.status.unwrap_or(self.status),
      status_old: Some(self.status),
      note: if changes.replace {
        changes.note.clone()
      } else {
        changes.note.clone().or_else(|| self.note.clone())
      },
    }
  }
}
