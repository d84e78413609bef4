// app/src/repositories/order_repository.rs

use async_trait::async_trait;
use orderdesk::{CoreError, CoreResult, CrudRepository, Page, PageRequest, Predicate, Record};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use super::sql::{push_page, push_where};
use crate::models::{Order, OrderChanges, OrderDraft};

const ORDER_COLUMNS: &str =
  "id, customer_id, brand, date, price, status, status_old, note, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgOrderRepository {
  pool: PgPool,
}

impl PgOrderRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CrudRepository<Order> for PgOrderRepository {
  #[instrument(name = "pg_orders::list", skip(self, predicates), fields(predicates = predicates.len()))]
  async fn list(&self, predicates: &[Predicate], page: PageRequest) -> CoreResult<Page<Order>> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM orders");
    push_where(&mut count, predicates);
    let total: i64 = count
      .build_query_scalar()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| CoreError::storage("orders.count", e))?;

    let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM orders", ORDER_COLUMNS));
    push_where(&mut select, predicates);
    push_page(&mut select, page.limit(), page.offset());
    let rows = select
      .build_query_as::<Order>()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| CoreError::storage("orders.list", e))?;

    debug!(total, returned = rows.len(), "Fetched order page.");
    Ok(Page::new(rows, u64::try_from(total).unwrap_or_default(), page))
  }

  async fn find(&self, id: i64) -> CoreResult<Option<Order>> {
    sqlx::query_as::<_, Order>(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| CoreError::storage("orders.find", e))
  }

  #[instrument(name = "pg_orders::create", skip_all)]
  async fn create(&self, draft: OrderDraft) -> CoreResult<Order> {
    sqlx::query_as::<_, Order>(&format!(
      "INSERT INTO orders (customer_id, brand, date, price, status, status_old, note) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
      ORDER_COLUMNS
    ))
    .bind(draft.customer_id)
    .bind(draft.brand)
    .bind(draft.date)
    .bind(draft.price)
    .bind(draft.status)
    .bind(draft.status_old)
    .bind(draft.note)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| CoreError::storage("orders.create", e))
  }

  #[instrument(name = "pg_orders::update", skip(self, changes))]
  async fn update(&self, id: i64, changes: &OrderChanges) -> CoreResult<Option<Order>> {
    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(|e| CoreError::storage("orders.update.begin", e))?;

    let current = sqlx::query_as::<_, Order>(&format!(
      "SELECT {} FROM orders WHERE id = $1 FOR UPDATE",
      ORDER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| CoreError::storage("orders.update.lock", e))?;

    let Some(current) = current else {
      return Ok(None);
    };
    let draft = current.merge(changes);

    let updated = sqlx::query_as::<_, Order>(&format!(
      "UPDATE orders SET customer_id = $2, brand = $3, date = $4, price = $5, status = $6, \
       status_old = $7, note = $8, updated_at = NOW() WHERE id = $1 RETURNING {}",
      ORDER_COLUMNS
    ))
    .bind(id)
    .bind(draft.customer_id)
    .bind(draft.brand)
    .bind(draft.date)
    .bind(draft.price)
    .bind(draft.status)
    .bind(draft.status_old)
    .bind(draft.note)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| CoreError::storage("orders.update", e))?;

    tx.commit()
      .await
      .map_err(|e| CoreError::storage("orders.update.commit", e))?;
    Ok(Some(updated))
  }

  #[instrument(name = "pg_orders::delete", skip(self))]
  async fn delete(&self, id: i64) -> CoreResult<Option<Order>> {
    sqlx::query_as::<_, Order>(&format!("DELETE FROM orders WHERE id = $1 RETURNING {}", ORDER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| CoreError::storage("orders.delete", e))
  }
}
