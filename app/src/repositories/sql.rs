// app/src/repositories/sql.rs

//! Renders translated filter predicates into a Postgres `WHERE` clause.

use orderdesk::{FilterValue, Predicate};
use sqlx::{Postgres, QueryBuilder};

/// Appends ` WHERE a AND b ...` for `predicates`; nothing when empty.
///
/// Column names come from static filter specs, values are always bound.
pub fn push_where<'args>(builder: &mut QueryBuilder<'args, Postgres>, predicates: &[Predicate]) {
  for (index, predicate) in predicates.iter().enumerate() {
    builder.push(if index == 0 { " WHERE " } else { " AND " });
    builder.push(predicate.column);
    builder.push(" ");
    builder.push(predicate.operator.sql());
    builder.push(" ");
    match predicate.like_pattern() {
      Some(pattern) => {
        builder.push_bind(pattern);
      }
      None => push_value(builder, &predicate.value),
    }
  }
}

fn push_value<'args>(builder: &mut QueryBuilder<'args, Postgres>, value: &FilterValue) {
  match value {
    FilterValue::Integer(i) => builder.push_bind(*i),
    FilterValue::Decimal(d) => builder.push_bind(*d),
    FilterValue::Date(d) => builder.push_bind(*d),
    FilterValue::Text(s) => builder.push_bind(s.clone()),
  };
}

/// `ORDER BY created_at DESC, id DESC LIMIT .. OFFSET ..`
pub fn push_page<'args>(builder: &mut QueryBuilder<'args, Postgres>, limit: u32, offset: u64) {
  builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
  builder.push_bind(i64::from(limit));
  builder.push(" OFFSET ");
  builder.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
}
