// core/src/validation/rules.rs

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// A single declarative constraint on a request field.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
  /// Must be present and not blank.
  Required,
  /// Only validated when the key is present. Marker; absent keys are skipped
  /// for every rule except `Required` anyway.
  Sometimes,
  /// `null` is accepted and short-circuits the remaining rules.
  Nullable,
  Integer,
  Numeric,
  Text,
  Email,
  Boolean,
  /// A string matching the chrono format, e.g. `"%Y-%m-%d"`.
  Date(&'static str),
  Gte(f64),
  MinLength(usize),
  MaxLength(usize),
  Size(usize),
  In(Vec<i64>),
}

impl Rule {
  /// Key used to look up custom messages, e.g. `("orderPrice", "numeric")`.
  pub fn key(&self) -> &'static str {
    match self {
      Rule::Required => "required",
      Rule::Sometimes => "sometimes",
      Rule::Nullable => "nullable",
      Rule::Integer => "integer",
      Rule::Numeric => "numeric",
      Rule::Text => "string",
      Rule::Email => "email",
      Rule::Boolean => "boolean",
      Rule::Date(_) => "date_format",
      Rule::Gte(_) => "gte",
      Rule::MinLength(_) => "min",
      Rule::MaxLength(_) => "max",
      Rule::Size(_) => "size",
      Rule::In(_) => "in",
    }
  }

  /// Presence markers are handled by the validator, not checked per value.
  pub(crate) fn is_marker(&self) -> bool {
    matches!(self, Rule::Required | Rule::Sometimes | Rule::Nullable)
  }

  pub(crate) fn check(&self, value: &Value) -> bool {
    match self {
      Rule::Required => !is_blank(value),
      Rule::Sometimes | Rule::Nullable => true,
      Rule::Integer => as_integer(value).is_some(),
      Rule::Numeric => as_decimal(value).is_some(),
      Rule::Text => value.is_string(),
      Rule::Email => value.as_str().is_some_and(is_email),
      Rule::Boolean => as_bool(value).is_some(),
      Rule::Date(format) => value
        .as_str()
        .is_some_and(|s| NaiveDate::parse_from_str(s, format).is_ok()),
      Rule::Gte(min) => as_decimal(value)
        .and_then(|d| d.to_f64())
        .is_some_and(|n| n >= *min),
      Rule::MinLength(n) => measure(value).is_some_and(|len| len >= *n as f64),
      Rule::MaxLength(n) => measure(value).is_some_and(|len| len <= *n as f64),
      Rule::Size(n) => measure(value).is_some_and(|len| len == *n as f64),
      Rule::In(allowed) => as_integer(value).is_some_and(|i| allowed.contains(&i)),
    }
  }

  pub(crate) fn default_message(&self, field: &str) -> String {
    match self {
      Rule::Required => format!("The {field} field is required."),
      Rule::Sometimes | Rule::Nullable => format!("The {field} field is invalid."),
      Rule::Integer => format!("The {field} field must be an integer."),
      Rule::Numeric => format!("The {field} field must be a number."),
      Rule::Text => format!("The {field} field must be a string."),
      Rule::Email => format!("The {field} field must be a valid email address."),
      Rule::Boolean => format!("The {field} field must be true or false."),
      Rule::Date(format) => format!("The {field} field must match the format {format}."),
      Rule::Gte(min) => format!("The {field} field must be greater than or equal to {min}."),
      Rule::MinLength(n) => format!("The {field} field must be at least {n} characters."),
      Rule::MaxLength(n) => format!("The {field} field must not be greater than {n} characters."),
      Rule::Size(n) => format!("The {field} field must be {n} characters."),
      Rule::In(allowed) => {
        let list = allowed.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
        format!("The selected {field} is invalid. Allowed values: {list}.")
      }
    }
  }
}

/// `null`, whitespace-only strings and empty arrays count as missing.
pub(crate) fn is_blank(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::String(s) => s.trim().is_empty(),
    Value::Array(a) => a.is_empty(),
    _ => false,
  }
}

pub(crate) fn as_integer(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64)),
    Value::String(s) => s.trim().parse::<i64>().ok(),
    _ => None,
  }
}

pub(crate) fn as_decimal(value: &Value) -> Option<Decimal> {
  match value {
    Value::Number(n) => Decimal::from_str(&n.to_string())
      .ok()
      .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
    Value::String(s) => Decimal::from_str(s.trim()).ok(),
    _ => None,
  }
}

pub(crate) fn as_bool(value: &Value) -> Option<bool> {
  match value {
    Value::Bool(b) => Some(*b),
    Value::Number(n) => match n.as_i64() {
      Some(0) => Some(false),
      Some(1) => Some(true),
      _ => None,
    },
    Value::String(s) => match s.as_str() {
      "0" | "false" => Some(false),
      "1" | "true" => Some(true),
      _ => None,
    },
    _ => None,
  }
}

/// String length in characters, or the numeric value itself.
fn measure(value: &Value) -> Option<f64> {
  match value {
    Value::String(s) => Some(s.chars().count() as f64),
    Value::Number(n) => n.as_f64(),
    Value::Array(a) => Some(a.len() as f64),
    _ => None,
  }
}

fn is_email(s: &str) -> bool {
  if s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
}
