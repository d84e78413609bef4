// app/src/repositories/customer_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use orderdesk::{CoreError, CoreResult, CrudRepository, MemoryTable, Page, PageRequest, Predicate, Record};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use super::sql::{push_page, push_where};
use super::CustomerReports;
use crate::models::{Customer, CustomerChanges, CustomerDraft, CustomerReport};

const CUSTOMER_COLUMNS: &str = "id, user_id, name, phone, email, note, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
  pool: PgPool,
}

impl PgCustomerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CrudRepository<Customer> for PgCustomerRepository {
  #[instrument(name = "pg_customers::list", skip(self, predicates), fields(predicates = predicates.len()))]
  async fn list(&self, predicates: &[Predicate], page: PageRequest) -> CoreResult<Page<Customer>> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM customers");
    push_where(&mut count, predicates);
    let total: i64 = count
      .build_query_scalar()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| CoreError::storage("customers.count", e))?;

    let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM customers", CUSTOMER_COLUMNS));
    push_where(&mut select, predicates);
    push_page(&mut select, page.limit(), page.offset());
    let rows = select
      .build_query_as::<Customer>()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| CoreError::storage("customers.list", e))?;

    debug!(total, returned = rows.len(), "Fetched customer page.");
    Ok(Page::new(rows, u64::try_from(total).unwrap_or_default(), page))
  }

  async fn find(&self, id: i64) -> CoreResult<Option<Customer>> {
    sqlx::query_as::<_, Customer>(&format!("SELECT {} FROM customers WHERE id = $1", CUSTOMER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| CoreError::storage("customers.find", e))
  }

  #[instrument(name = "pg_customers::create", skip_all)]
  async fn create(&self, draft: CustomerDraft) -> CoreResult<Customer> {
    sqlx::query_as::<_, Customer>(&format!(
      "INSERT INTO customers (user_id, name, phone, email, note) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
      CUSTOMER_COLUMNS
    ))
    .bind(draft.user_id)
    .bind(draft.name)
    .bind(draft.phone)
    .bind(draft.email)
    .bind(draft.note)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| CoreError::storage("customers.create", e))
  }

  #[instrument(name = "pg_customers::update", skip(self, changes))]
  async fn update(&self, id: i64, changes: &CustomerChanges) -> CoreResult<Option<Customer>> {
    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(|e| CoreError::storage("customers.update.begin", e))?;

    let current = sqlx::query_as::<_, Customer>(&format!(
      "SELECT {} FROM customers WHERE id = $1 FOR UPDATE",
      CUSTOMER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| CoreError::storage("customers.update.lock", e))?;

    let Some(current) = current else {
      return Ok(None);
    };
    let draft = current.merge(changes);

    let updated = sqlx::query_as::<_, Customer>(&format!(
      "UPDATE customers SET name = $2, phone = $3, email = $4, note = $5, updated_at = NOW() \
       WHERE id = $1 RETURNING {}",
      CUSTOMER_COLUMNS
    ))
    .bind(id)
    .bind(draft.name)
    .bind(draft.phone)
    .bind(draft.email)
    .bind(draft.note)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| CoreError::storage("customers.update", e))?;

    tx.commit()
      .await
      .map_err(|e| CoreError::storage("customers.update.commit", e))?;
    Ok(Some(updated))
  }

  #[instrument(name = "pg_customers::delete", skip(self))]
  async fn delete(&self, id: i64) -> CoreResult<Option<Customer>> {
    sqlx::query_as::<_, Customer>(&format!(
      "DELETE FROM customers WHERE id = $1 RETURNING {}",
      CUSTOMER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| CoreError::storage("customers.delete", e))
  }
}

#[async_trait]
impl CustomerReports for PgCustomerRepository {
  #[instrument(name = "pg_customers::report", skip(self, predicates))]
  async fn report(&self, predicates: &[Predicate], now: DateTime<Utc>) -> CoreResult<CustomerReport> {
    let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*), COUNT(*) FILTER (WHERE created_at >= ");
    query.push_bind(now - Duration::days(7));
    query.push("), COUNT(*) FILTER (WHERE created_at >= ");
    query.push_bind(now - Duration::days(30));
    query.push(") FROM customers");
    push_where(&mut query, predicates);

    let (total, created_last7_days, created_last30_days): (i64, i64, i64) = query
      .build_query_as()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| CoreError::storage("customers.report", e))?;

    Ok(CustomerReport {
      total,
      created_last7_days,
      created_last30_days,
    })
  }
}

#[async_trait]
impl CustomerReports for MemoryTable<Customer> {
  async fn report(&self, predicates: &[Predicate], now: DateTime<Utc>) -> CoreResult<CustomerReport> {
    let rows = self.select(predicates);
    let since = |days: i64| {
      let cutoff = now - Duration::days(days);
      rows.iter().filter(|c| c.created_at >= cutoff).count() as i64
    };
    Ok(CustomerReport {
      total: rows.len() as i64,
      created_last7_days: since(7),
      created_last30_days: since(30),
    })
  }
}
