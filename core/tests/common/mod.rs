// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use orderdesk::{
  FilterField, FilterOperator, FilterSpec, FilterValue, Filterable, LabeledEnum, Record, ValueKind,
};
use rust_decimal::Decimal;
use tracing::Level;

// --- A small order-like record used across the core tests ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Draft,
  Shipped,
  Closed,
}

impl LabeledEnum for Stage {
  const TABLE: &'static [(Self, i64, &'static str)] = &[
    (Stage::Draft, 1, "Draft"),
    (Stage::Shipped, 2, "Shipped"),
    (Stage::Closed, 3, "Closed"),
  ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
  pub id: i64,
  pub label: String,
  pub sent_on: NaiveDate,
  pub weight: Decimal,
  pub stage: i64,
  pub stage_old: Option<i64>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParcelDraft {
  pub label: String,
  pub sent_on: NaiveDate,
  pub weight: Decimal,
  pub stage: i64,
  pub stage_old: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ParcelChanges {
  pub label: Option<String>,
  pub stage: Option<i64>,
}

impl Filterable for Parcel {
  fn filter_value(&self, column: &str) -> Option<FilterValue> {
    match column {
      "id" => Some(self.id.into()),
      "label" => Some(self.label.clone().into()),
      "sent_on" => Some(self.sent_on.into()),
      "weight" => Some(self.weight.into()),
      "stage" => Some(self.stage.into()),
      "stage_old" => self.stage_old.map(FilterValue::from),
      _ => None,
    }
  }
}

impl Record for Parcel {
  type Draft = ParcelDraft;
  type Changes = ParcelChanges;
  const RESOURCE: &'static str = "Parcel";

  fn id(&self) -> i64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn materialize(id: i64, draft: ParcelDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
    Parcel {
      id,
      label: draft.label,
      sent_on: draft.sent_on,
      weight: draft.weight,
      stage: draft.stage,
      stage_old: draft.stage_old,
      created_at,
      updated_at,
    }
  }

  fn merge(&self, changes: &ParcelChanges) -> ParcelDraft {
    ParcelDraft {
      label: changes.label.clone().unwrap_or_else(|| self.label.clone()),
      sent_on: self.sent_on,
      weight: self.weight,
      stage: changes.stage.unwrap_or(self.stage),
      stage_old: Some(self.stage),
    }
  }
}

pub static PARCEL_FILTERS: FilterSpec = FilterSpec::new(
  "parcels",
  &[
    FilterField::new("parcelId", "id", ValueKind::Integer, FilterOperator::EQUALITY),
    FilterField::new("parcelLabel", "label", ValueKind::Text, FilterOperator::SUBSTRING),
    FilterField::new("parcelSentOn", "sent_on", ValueKind::Date, FilterOperator::COMPARISON),
    FilterField::new("parcelWeight", "weight", ValueKind::Decimal, FilterOperator::COMPARISON),
    FilterField::new("parcelStage", "stage", ValueKind::Integer, FilterOperator::EQUALITY),
  ],
);

pub fn draft(label: &str, day: u32, weight: &str, stage: i64) -> ParcelDraft {
  ParcelDraft {
    label: label.to_string(),
    sent_on: NaiveDate::from_ymd_opt(2024, 1, day).expect("valid test date"),
    weight: weight.parse().expect("valid test decimal"),
    stage,
    stage_old: None,
  }
}

pub fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
  raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
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
