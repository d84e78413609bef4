// core/src/validation/errors.rs

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name → failure messages, rendered as-is in 422 responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  /// Shorthand for a single-field failure.
  pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.add(field, message);
    errors
  }

  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  pub fn merge(&mut self, other: ValidationErrors) {
    for (field, messages) in other.0 {
      self.0.entry(field).or_default().extend(messages);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn has(&self, field: &str) -> bool {
    self.0.contains_key(field)
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  /// `Ok(())` when nothing was recorded.
  pub fn into_result(self) -> Result<(), ValidationErrors> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}
