// core/src/filter/mod.rs

//! Query-string filter translation.
//!
//! A resource declares a static [`FilterSpec`]: for every externally visible
//! field, the column it maps to, the kind of value it holds and the operators
//! clients may use on it. [`FilterSpec::translate`] then turns raw query pairs
//! such as `orderBrand[lk]=Nike` into [`Predicate`]s.
//!
//! Translation is permissive: unknown fields, unknown or disallowed operators
//! and unparsable values are dropped without an error.

mod operator;
mod value;

pub use operator::FilterOperator;
pub use value::{FilterValue, ValueKind, DATE_FORMAT};

use std::cmp::Ordering;
use tracing::trace;

/// One filterable field of a resource.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
  pub param: &'static str,
  pub column: &'static str,
  pub kind: ValueKind,
  pub operators: &'static [FilterOperator],
}

impl FilterField {
  pub const fn new(
    param: &'static str,
    column: &'static str,
    kind: ValueKind,
    operators: &'static [FilterOperator],
  ) -> Self {
    Self {
      param,
      column,
      kind,
      operators,
    }
  }

  pub fn allows(&self, operator: FilterOperator) -> bool {
    self.operators.contains(&operator)
  }
}

/// Allow-list and column map for one resource.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
  resource: &'static str,
  fields: &'static [FilterField],
}

impl FilterSpec {
  pub const fn new(resource: &'static str, fields: &'static [FilterField]) -> Self {
    Self { resource, fields }
  }

  pub fn resource(&self) -> &'static str {
    self.resource
  }

  pub fn fields(&self) -> &'static [FilterField] {
    self.fields
  }

  pub fn field(&self, param: &str) -> Option<&'static FilterField> {
    self.fields.iter().find(|f| f.param == param)
  }

  /// Builds predicates from raw query pairs, in input order.
  pub fn translate<I, K, V>(&self, params: I) -> Vec<Predicate>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
  {
    let mut predicates = Vec::new();
    for (key, raw) in params {
      let key = key.as_ref();
      let Some((param, token)) = split_param_key(key) else {
        continue;
      };
      let Some(field) = self.field(param) else {
        continue;
      };
      let Some(operator) = FilterOperator::from_token(token).filter(|op| field.allows(*op)) else {
        trace!(resource = self.resource, %key, "Ignoring filter with operator outside the allow-list.");
        continue;
      };
      let Some(value) = field.kind.parse(raw.as_ref()) else {
        trace!(resource = self.resource, %key, "Ignoring filter whose value does not parse.");
        continue;
      };
      predicates.push(Predicate {
        column: field.column,
        operator,
        value,
      });
    }
    predicates
  }
}

/// Splits `field[op]` into `("field", "op")`.
pub fn split_param_key(key: &str) -> Option<(&str, &str)> {
  let (field, rest) = key.split_once('[')?;
  let op = rest.strip_suffix(']')?;
  if field.is_empty() || op.is_empty() || op.contains(['[', ']']) {
    return None;
  }
  Some((field, op))
}

/// A single `(column, operator, value)` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
  pub column: &'static str,
  pub operator: FilterOperator,
  pub value: FilterValue,
}

/// Records that can be evaluated against predicates without a database.
pub trait Filterable {
  /// Current value of `column`, `None` when the column is NULL or unknown.
  fn filter_value(&self, column: &str) -> Option<FilterValue>;
}

impl Predicate {
  pub fn new(column: &'static str, operator: FilterOperator, value: impl Into<FilterValue>) -> Self {
    Self {
      column,
      operator,
      value: value.into(),
    }
  }

  /// Evaluates the predicate with SQL NULL semantics: a NULL column never
  /// matches, whatever the operator.
  pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
    let Some(actual) = record.filter_value(self.column) else {
      return false;
    };
    match self.operator {
      FilterOperator::Like => actual.as_text().contains(self.value.as_text().as_ref()),
      FilterOperator::NotLike => !actual.as_text().contains(self.value.as_text().as_ref()),
      FilterOperator::ILike => contains_ignore_case(&actual.as_text(), &self.value.as_text()),
      FilterOperator::NotILike => !contains_ignore_case(&actual.as_text(), &self.value.as_text()),
      op => match actual.compare(&self.value) {
        Some(ordering) => match op {
          FilterOperator::Eq => ordering == Ordering::Equal,
          FilterOperator::Ne => ordering != Ordering::Equal,
          FilterOperator::Lt => ordering == Ordering::Less,
          FilterOperator::Lte => ordering != Ordering::Greater,
          FilterOperator::Gt => ordering == Ordering::Greater,
          FilterOperator::Gte => ordering != Ordering::Less,
          _ => false,
        },
        None => false,
      },
    }
  }

  /// `%value%` with LIKE metacharacters escaped; `None` for non-substring
  /// operators.
  pub fn like_pattern(&self) -> Option<String> {
    if !self.operator.is_substring() {
      return None;
    }
    let raw = self.value.as_text();
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for c in raw.chars() {
      if matches!(c, '\\' | '%' | '_') {
        pattern.push('\\');
      }
      pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
  }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}
