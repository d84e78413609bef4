// app/src/models/customer.rs

use chrono::{DateTime, Utc};
use orderdesk::{FilterField, FilterOperator, FilterSpec, FilterValue, Filterable, Record, ValueKind};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer owned by one user. Exposed over HTTP as a "task".
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub note: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
  pub user_id: i64,
  pub name: String,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomerChanges {
  /// PUT semantics: absent optional fields become `None`.
  #[serde(skip)]
  pub replace: bool,
  #[serde(rename = "customerName")]
  pub name: Option<String>,
  #[serde(rename = "customerPhone")]
  pub phone: Option<String>,
  #[serde(rename = "customerEmail")]
  pub email: Option<String>,
  #[serde(rename = "customerNote")]
  pub note: Option<String>,
}

pub static CUSTOMER_FILTERS: FilterSpec = FilterSpec::new(
  "customers",
  &[
    FilterField::new("customerId", "id", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("userId", "user_id", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("customerName", "name", ValueKind::Text, FilterOperator::SUBSTRING),
    FilterField::new("customerEmail", "email", ValueKind::Text, FilterOperator::SUBSTRING),
    FilterField::new("customerPhone", "phone", ValueKind::Text, FilterOperator::SUBSTRING),
  ],
);

impl Filterable for Customer {
  fn filter_value(&self, column: &str) -> Option<FilterValue> {
    match column {
      "id" => Some(self.id.into()),
      "user_id" => Some(self.user_id.into()),
      "name" => Some(self.name.as_str().into()),
      "email" => self.email.as_deref().map(FilterValue::from),
      "phone" => self.phone.as_deref().map(FilterValue::from),
      "note" => self.note.as_deref().map(FilterValue::from),
      _ => None,
    }
  }
}

impl Record for Customer {
  type Draft = CustomerDraft;
  type Changes = CustomerChanges;
  const RESOURCE: &'static str = "Customer";

  fn id(&self) -> i64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn materialize(id: i64, draft: CustomerDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
    Customer {
      id,
      user_id: draft.user_id,
      name: draft.name,
      phone: draft.phone,
      email: draft.email,
      note: draft.note,
      created_at,
      updated_at,
    }
  }

  fn merge(&self, changes: &CustomerChanges) -> CustomerDraft {
    let overlay = |new: &Option<String>, old: &Option<String>| {
      if changes.replace {
        new.clone()
      } else {
        new.clone().or_else(|| old.clone())
      }
    };
    CustomerDraft {
      user_id: self.user_id,
      name: changes.name.clone().unwrap_or_else(|| self.name.clone()),
      phone: overlay(&changes.phone, &self.phone),
      email: overlay(&changes.email, &self.email),
      note: overlay(&changes.note, &self.note),
    }
  }
}

/// Counts over a filtered set of customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReport {
  pub total: i64,
  pub created_last7_days: i64,
  pub created_last30_days: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Customer {
    Customer::materialize(
      4,
      CustomerDraft {
        user_id: 7,
        name: "Aysel".to_string(),
        phone: Some("+994501234567".to_string()),
        email: Some("aysel@example.com".to_string()),
        note: Some("VIP".to_string()),
      },
      Utc::now(),
      Utc::now(),
    )
  }

  #[test]
  fn patch_keeps_absent_fields() {
    let draft = sample().merge(&CustomerChanges {
      name: Some("Aysel M.".to_string()),
      ..Default::default()
    });
    assert_eq!(draft.name, "Aysel M.");
    assert_eq!(draft.phone.as_deref(), Some("+994501234567"));
    assert_eq!(draft.note.as_deref(), Some("VIP"));
    assert_eq!(draft.user_id, 7);
  }

  #[test]
  fn replace_clears_absent_optional_fields() {
    let draft = sample().merge(&CustomerChanges {
      replace: true,
      name: Some("Aysel M.".to_string()),
      email: Some("new@example.com".to_string()),
      ..Default::default()
    });
    assert_eq!(draft.name, "Aysel M.");
    assert_eq!(draft.email.as_deref(), Some("new@example.com"));
    assert_eq!(draft.phone, None);
    assert_eq!(draft.note, None);
    assert_eq!(draft.user_id, 7);
  }
}
