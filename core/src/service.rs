// core/src/service.rs

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{CoreError, CoreResult};
use crate::filter::FilterSpec;
use crate::pagination::{Page, PageRequest};
use crate::repository::{CrudRepository, Record};

/// Thin orchestration over a [`CrudRepository`]: translates filters on the
/// way in and turns `None` into [`CoreError::NotFound`] on the way out.
pub struct CrudService<R: Record> {
  repository: Arc<dyn CrudRepository<R>>,
  filters: &'static FilterSpec,
}

impl<R: Record> Clone for CrudService<R> {
  fn clone(&self) -> Self {
    Self {
      repository: Arc::clone(&self.repository),
      filters: self.filters,
    }
  }
}

impl<R: Record> CrudService<R> {
  pub fn new(repository: Arc<dyn CrudRepository<R>>, filters: &'static FilterSpec) -> Self {
    Self { repository, filters }
  }

  pub fn repository(&self) -> &Arc<dyn CrudRepository<R>> {
    &self.repository
  }

  pub fn filters(&self) -> &'static FilterSpec {
    self.filters
  }

  #[instrument(name = "crud_service::list", skip(self, query), fields(resource = R::RESOURCE, page = page.page(), per_page = page.per_page()))]
  pub async fn list(&self, query: &[(String, String)], page: PageRequest) -> CoreResult<Page<R>> {
    let predicates = self.filters.translate(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    debug!(predicates = predicates.len(), "Filters translated.");
    self.repository.list(&predicates, page).await
  }

  #[instrument(name = "crud_service::get", skip(self), fields(resource = R::RESOURCE))]
  pub async fn get(&self, id: i64) -> CoreResult<R> {
    self
      .repository
      .find(id)
      .await?
      .ok_or_else(|| CoreError::not_found(R::RESOURCE, id))
  }

  #[instrument(name = "crud_service::create", skip_all, fields(resource = R::RESOURCE))]
  pub async fn create(&self, draft: R::Draft) -> CoreResult<R> {
    let row = self.repository.create(draft).await?;
    info!(id = row.id(), "Record created.");
    Ok(row)
  }

  #[instrument(name = "crud_service::update", skip(self, changes), fields(resource = R::RESOURCE))]
  pub async fn update(&self, id: i64, changes: &R::Changes) -> CoreResult<R> {
    match self.repository.update(id, changes).await? {
      Some(row) => {
        info!("Record updated.");
        Ok(row)
      }
      None => {
        warn!("Update target does not exist.");
        Err(CoreError::not_found(R::RESOURCE, id))
      }
    }
  }

  #[instrument(name = "crud_service::delete", skip(self), fields(resource = R::RESOURCE))]
  pub async fn delete(&self, id: i64) -> CoreResult<R> {
    let removed = self
      .repository
      .delete(id)
      .await?
      .ok_or_else(|| CoreError::not_found(R::RESOURCE, id))?;
    info!("Record deleted.");
    Ok(removed)
  }
}
