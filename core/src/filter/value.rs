// core/src/filter/value.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a filterable column holds; decides how a raw query value is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
  Integer,
  Decimal,
  Date,
  Text,
}

impl ValueKind {
  /// Parses a raw query-string value. `None` means the value is unusable for
  /// this column and the predicate should be dropped.
  pub fn parse(self, raw: &str) -> Option<FilterValue> {
    match self {
      ValueKind::Integer => raw.trim().parse::<i64>().ok().map(FilterValue::Integer),
      ValueKind::Decimal => Decimal::from_str(raw.trim()).ok().map(FilterValue::Decimal),
      ValueKind::Date => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .ok()
        .map(FilterValue::Date),
      ValueKind::Text => Some(FilterValue::Text(raw.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
  Integer(i64),
  Decimal(Decimal),
  Date(NaiveDate),
  Text(String),
}

impl FilterValue {
  /// Orders two values of compatible kinds. Integers and decimals compare
  /// numerically; anything else across kinds is incomparable.
  pub fn compare(&self, other: &FilterValue) -> Option<Ordering> {
    match (self, other) {
      (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
      (FilterValue::Decimal(a), FilterValue::Decimal(b)) => Some(a.cmp(b)),
      (FilterValue::Integer(a), FilterValue::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
      (FilterValue::Decimal(a), FilterValue::Integer(b)) => Some(a.cmp(&Decimal::from(*b))),
      (FilterValue::Date(a), FilterValue::Date(b)) => Some(a.cmp(b)),
      (FilterValue::Text(a), FilterValue::Text(b)) => Some(a.cmp(b)),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Cow<'_, str> {
    match self {
      FilterValue::Text(s) => Cow::Borrowed(s.as_str()),
      FilterValue::Integer(i) => Cow::Owned(i.to_string()),
      FilterValue::Decimal(d) => Cow::Owned(d.to_string()),
      FilterValue::Date(d) => Cow::Owned(d.format(DATE_FORMAT).to_string()),
    }
  }
}

impl From<i64> for FilterValue {
  fn from(v: i64) -> Self {
    FilterValue::Integer(v)
  }
}

impl From<Decimal> for FilterValue {
  fn from(v: Decimal) -> Self {
    FilterValue::Decimal(v)
  }
}

impl From<NaiveDate> for FilterValue {
  fn from(v: NaiveDate) -> Self {
    FilterValue::Date(v)
  }
}

impl From<&str> for FilterValue {
  fn from(v: &str) -> Self {
    FilterValue::Text(v.to_string())
  }
}

impl From<String> for FilterValue {
  fn from(v: String) -> Self {
    FilterValue::Text(v)
  }
}
