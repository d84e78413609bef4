// core/src/validation/mod.rs

//! Declarative request validation.
//!
//! A [`Validator`] lists the rules of every accepted field once; the write
//! mode then decides which of the resource's business fields are mandatory:
//!
//! | mode      | business fields | other fields |
//! |-----------|-----------------|--------------|
//! | `Create`  | required        | as declared  |
//! | `Replace` | required        | sometimes    |
//! | `Patch`   | sometimes       | sometimes    |
//!
//! Validation yields a [`Validated`] map holding only declared fields that
//! were present in the payload, with integer and boolean fields normalised
//! to JSON numbers / booleans so that typed DTOs deserialize cleanly.

mod errors;
mod rules;

pub use errors::ValidationErrors;
pub use rules::Rule;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Which kind of write a payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
  Create,
  /// Full replacement (HTTP PUT).
  Replace,
  /// Partial update (HTTP PATCH).
  Patch,
}

#[derive(Debug, Clone)]
struct FieldRules {
  field: &'static str,
  rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
  fields: Vec<FieldRules>,
  messages: HashMap<(&'static str, &'static str), String>,
}

impl Validator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn field(mut self, field: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
    self.fields.push(FieldRules {
      field,
      rules: rules.into_iter().collect(),
    });
    self
  }

  /// Overrides the message for `(field, rule_key)`; see [`Rule::key`].
  pub fn message(mut self, field: &'static str, rule_key: &'static str, message: impl Into<String>) -> Self {
    self.messages.insert((field, rule_key), message.into());
    self
  }

  /// Returns a copy of this validator with presence rules adjusted for `mode`.
  pub fn for_mode(&self, mode: WriteMode, business_fields: &[&str]) -> Validator {
    let mut adjusted = self.clone();
    for entry in &mut adjusted.fields {
      let is_business = business_fields.contains(&entry.field);
      entry.rules.retain(|r| !matches!(r, Rule::Required | Rule::Sometimes));
      let presence = match (mode, is_business) {
        (WriteMode::Create, true) | (WriteMode::Replace, true) => Some(Rule::Required),
        (WriteMode::Create, false) => None,
        (WriteMode::Replace, false) | (WriteMode::Patch, _) => Some(Rule::Sometimes),
      };
      if let Some(rule) = presence {
        entry.rules.insert(0, rule);
      }
    }
    adjusted
  }

  pub fn is_required(&self, field: &str) -> bool {
    self
      .fields
      .iter()
      .any(|f| f.field == field && f.rules.contains(&Rule::Required))
  }

  pub fn validate(&self, payload: &Value) -> Result<Validated, ValidationErrors> {
    let empty = Map::new();
    let object = match payload {
      Value::Object(map) => map,
      Value::Null => &empty,
      _ => {
        return Err(ValidationErrors::single(
          "body",
          "The request body must be a JSON object.",
        ))
      }
    };

    let mut errors = ValidationErrors::new();
    let mut validated = Map::new();

    for entry in &self.fields {
      let field = entry.field;
      let required = entry.rules.contains(&Rule::Required);
      let nullable = entry.rules.contains(&Rule::Nullable);

      let value = match object.get(field) {
        Some(v) if !(required && rules::is_blank(v)) => v,
        Some(_) | None if required => {
          errors.add(field, self.message_for(field, &Rule::Required));
          continue;
        }
        // Absent and optional: nothing to check, nothing to keep.
        _ => continue,
      };

      if value.is_null() && nullable {
        validated.insert(field.to_string(), Value::Null);
        continue;
      }

      let mut field_ok = true;
      for rule in entry.rules.iter().filter(|r| !r.is_marker()) {
        if !rule.check(value) {
          errors.add(field, self.message_for(field, rule));
          field_ok = false;
        }
      }
      if field_ok {
        validated.insert(field.to_string(), normalise(&entry.rules, value));
      }
    }

    errors.into_result()?;
    Ok(Validated(validated))
  }

  fn message_for(&self, field: &'static str, rule: &Rule) -> String {
    self
      .messages
      .get(&(field, rule.key()))
      .cloned()
      .unwrap_or_else(|| rule.default_message(field))
  }
}

fn normalise(rules: &[Rule], value: &Value) -> Value {
  if rules.contains(&Rule::Integer) {
    if let Some(i) = rules::as_integer(value) {
      return Value::from(i);
    }
  }
  if rules.contains(&Rule::Boolean) {
    if let Some(b) = rules::as_bool(value) {
      return Value::Bool(b);
    }
  }
  value.clone()
}

/// Fields that passed validation, keyed by their external names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated(Map<String, Value>);

impl Validated {
  pub fn get(&self, field: &str) -> Option<&Value> {
    self.0.get(field)
  }

  pub fn contains(&self, field: &str) -> bool {
    self.0.contains_key(field)
  }

  pub fn str(&self, field: &str) -> Option<&str> {
    self.0.get(field).and_then(Value::as_str)
  }

  pub fn insert(&mut self, field: impl Into<String>, value: Value) {
    self.0.insert(field.into(), value);
  }

  pub fn into_map(self) -> Map<String, Value> {
    self.0
  }

  /// Deserializes into a typed DTO. A failure here means the rules and the
  /// DTO disagree, reported against the `body` field.
  pub fn into_dto<T: DeserializeOwned>(self) -> Result<T, ValidationErrors> {
    serde_json::from_value(Value::Object(self.0))
      .map_err(|e| ValidationErrors::single("body", format!("The request body could not be read: {e}")))
  }
}
