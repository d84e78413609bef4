// core/src/resource.rs

//! Building blocks for external JSON shapes: labeled enum values and the
//! paginated collection body.

use serde::Serialize;
use serde_json::Value;

use crate::pagination::{Page, PageLinks, PageMeta};

/// `{ "value": 2, "label": "İstehsal" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
  pub value: i64,
  pub label: &'static str,
}

/// An enum persisted as an integer and rendered with a human label.
///
/// Implementors supply one static table; every lookup goes through it.
pub trait LabeledEnum: Copy + PartialEq + Sized + 'static {
  /// `(variant, stored value, label)` for every variant.
  const TABLE: &'static [(Self, i64, &'static str)];

  fn value(self) -> i64 {
    Self::TABLE
      .iter()
      .find(|(variant, _, _)| *variant == self)
      .map(|(_, value, _)| *value)
      .unwrap_or_default()
  }

  fn label(self) -> &'static str {
    Self::TABLE
      .iter()
      .find(|(variant, _, _)| *variant == self)
      .map(|(_, _, label)| *label)
      .unwrap_or_default()
  }

  fn from_value(value: i64) -> Option<Self> {
    Self::TABLE
      .iter()
      .find(|(_, v, _)| *v == value)
      .map(|(variant, _, _)| *variant)
  }

  fn values() -> Vec<i64> {
    Self::TABLE.iter().map(|(_, value, _)| *value).collect()
  }

  fn labeled(self) -> LabeledValue {
    LabeledValue {
      value: self.value(),
      label: self.label(),
    }
  }

  fn all_labeled() -> Vec<LabeledValue> {
    Self::TABLE
      .iter()
      .map(|(_, value, label)| LabeledValue {
        value: *value,
        label: *label,
      })
      .collect()
  }

  /// Maps a raw stored value to `{value, label}`. Unknown or missing values
  /// fall back to `default`, which may itself be `None`.
  fn resolve(raw: Option<i64>, default: Option<Self>) -> Option<LabeledValue> {
    raw
      .and_then(Self::from_value)
      .or(default)
      .map(Self::labeled)
  }

  /// Like [`LabeledEnum::resolve`] for loosely-typed input: integers and
  /// numeric strings are accepted.
  fn resolve_json(raw: &Value, default: Option<Self>) -> Option<LabeledValue> {
    let parsed = match raw {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse::<i64>().ok(),
      _ => None,
    };
    Self::resolve(parsed, default)
  }
}

/// `{message, data, meta, links}` for a page of formatted resources.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionBody<T: Serialize> {
  pub message: String,
  pub data: Vec<T>,
  pub meta: PageMeta,
  pub links: PageLinks,
}

impl<T: Serialize> CollectionBody<T> {
  pub fn from_page(page: Page<T>, message: impl Into<String>, base_url: &str, query: &[(String, String)]) -> Self {
    let meta = page.meta();
    let links = page.links(base_url, query);
    Self {
      message: message.into(),
      data: page.into_items(),
      meta,
      links,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[derive(Debug, Clone, Copy, PartialEq)]
  enum Light {
    Red,
    Green,
  }

  impl LabeledEnum for Light {
    const TABLE: &'static [(Self, i64, &'static str)] = &[(Light::Red, 1, "Stop"), (Light::Green, 2, "Go")];
  }

  #[test]
  fn resolve_falls_back_to_default_only_when_given() {
    assert_eq!(Light::resolve(Some(2), None).map(|l| l.label), Some("Go"));
    assert_eq!(Light::resolve(Some(9), Some(Light::Red)).map(|l| l.value), Some(1));
    assert_eq!(Light::resolve(None, None), None);
    assert_eq!(Light::resolve_json(&json!("2"), None).map(|l| l.value), Some(2));
    assert_eq!(Light::resolve_json(&json!(null), None), None);
  }
}
