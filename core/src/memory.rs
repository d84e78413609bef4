// core/src/memory.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::error::CoreResult;
use crate::filter::Predicate;
use crate::pagination::{Page, PageRequest};
use crate::repository::{CrudRepository, Record};

/// A process-local table implementing [`CrudRepository`].
///
/// Every operation holds the table lock for its whole duration, which makes
/// update's read-merge-write atomic. The lock is never held across `.await`.
pub struct MemoryTable<R: Record> {
  state: Mutex<TableState<R>>,
}

struct TableState<R> {
  rows: BTreeMap<i64, R>,
  next_id: i64,
}

impl<R: Record> Default for MemoryTable<R> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R: Record> fmt::Debug for MemoryTable<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MemoryTable")
      .field("resource", &R::RESOURCE)
      .field("rows", &self.len())
      .finish()
  }
}

impl<R: Record> MemoryTable<R> {
  pub fn new() -> Self {
    Self {
      state: Mutex::new(TableState {
        rows: BTreeMap::new(),
        next_id: 1,
      }),
    }
  }

  pub fn len(&self) -> usize {
    self.state.lock().rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Inserts with an explicit creation time (seeding, backfills).
  pub fn insert_at(&self, draft: R::Draft, created_at: DateTime<Utc>) -> R {
    let mut state = self.state.lock();
    let id = state.next_id;
    state.next_id += 1;
    let row = R::materialize(id, draft, created_at, created_at);
    state.rows.insert(id, row.clone());
    row
  }

  /// Copies of all rows matching `predicates`, in id order.
  pub fn select(&self, predicates: &[Predicate]) -> Vec<R> {
    self
      .state
      .lock()
      .rows
      .values()
      .filter(|row| predicates.iter().all(|p| p.matches(*row)))
      .cloned()
      .collect()
  }

  pub fn clear(&self) {
    let mut state = self.state.lock();
    state.rows.clear();
    state.next_id = 1;
  }
}

#[async_trait]
impl<R: Record> CrudRepository<R> for MemoryTable<R> {
  async fn list(&self, predicates: &[Predicate], page: PageRequest) -> CoreResult<Page<R>> {
    let mut matching = self.select(predicates);
    matching.sort_by(|a, b| {
      b.created_at()
        .cmp(&a.created_at())
        .then_with(|| b.id().cmp(&a.id()))
    });
    let total = matching.len() as u64;
    let items = matching
      .into_iter()
      .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
      .take(page.limit() as usize)
      .collect();
    Ok(Page::new(items, total, page))
  }

  async fn find(&self, id: i64) -> CoreResult<Option<R>> {
    Ok(self.state.lock().rows.get(&id).cloned())
  }

  async fn create(&self, draft: R::Draft) -> CoreResult<R> {
    let row = self.insert_at(draft, Utc::now());
    debug!(resource = R::RESOURCE, id = row.id(), "Inserted row into memory table.");
    Ok(row)
  }

  async fn update(&self, id: i64, changes: &R::Changes) -> CoreResult<Option<R>> {
    let mut state = self.state.lock();
    let Some(current) = state.rows.get(&id) else {
      return Ok(None);
    };
    let draft = current.merge(changes);
    let row = R::materialize(id, draft, current.created_at(), Utc::now());
    state.rows.insert(id, row.clone());
    Ok(Some(row))
  }

  async fn delete(&self, id: i64) -> CoreResult<Option<R>> {
    Ok(self.state.lock().rows.remove(&id))
  }
}
