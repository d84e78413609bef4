// core/src/repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::filter::{Filterable, Predicate};
use crate::pagination::{Page, PageRequest};

/// A persisted entity with an integer primary key.
///
/// `Draft` carries every writable column (what a create or full replace
/// writes); `Changes` is whatever an update request carries. Merging changes
/// into the current row is defined here so every backend merges the same way.
pub trait Record: Filterable + Clone + Send + Sync + 'static {
  type Draft: Clone + Send + Sync + 'static;
  type Changes: Send + Sync + 'static;

  /// Used in not-found messages, e.g. `"Order"`.
  const RESOURCE: &'static str;

  fn id(&self) -> i64;

  fn created_at(&self) -> DateTime<Utc>;

  /// Builds the stored row from a draft and its bookkeeping columns.
  fn materialize(id: i64, draft: Self::Draft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self;

  /// Overlays `changes` on this row, producing the draft to persist.
  fn merge(&self, changes: &Self::Changes) -> Self::Draft;
}

/// Storage for one resource. Absence is reported as `None`, never as an
/// error, so callers decide what a miss means.
#[async_trait]
pub trait CrudRepository<R: Record>: Send + Sync {
  /// Rows matching every predicate, newest first.
  async fn list(&self, predicates: &[Predicate], page: PageRequest) -> CoreResult<Page<R>>;

  async fn find(&self, id: i64) -> CoreResult<Option<R>>;

  async fn create(&self, draft: R::Draft) -> CoreResult<R>;

  /// Reads, merges and writes as one atomic step; returns the fresh row.
  async fn update(&self, id: i64, changes: &R::Changes) -> CoreResult<Option<R>>;

  /// Returns the removed row.
  async fn delete(&self, id: i64) -> CoreResult<Option<R>>;
}
