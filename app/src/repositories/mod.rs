// app/src/repositories/mod.rs

//! Storage for every resource, in Postgres or in process memory.

pub mod customer_repository;
pub mod order_repository;
pub mod otp_repository;
pub mod sql;
pub mod user_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderdesk::{CoreResult, CrudRepository, MemoryTable, Predicate};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::Result;
use crate::models::{Customer, CustomerReport, NewUser, Order, Otp, User};

pub use customer_repository::PgCustomerRepository;
pub use order_repository::PgOrderRepository;
pub use otp_repository::{MemoryOtpRepository, PgOtpRepository};
pub use user_repository::{MemoryUserRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: NewUser) -> CoreResult<User>;

  async fn find(&self, id: i64) -> CoreResult<Option<User>>;

  async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>>;

  async fn update_name(&self, id: i64, name: &str) -> CoreResult<Option<User>>;
}

#[async_trait]
pub trait OtpRepository: Send + Sync {
  async fn insert(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> CoreResult<Otp>;

  /// Marks the newest unused, unexpired code for `email` as used and returns
  /// it. Lookup and mark happen atomically.
  async fn consume(&self, email: &str, code: &str, now: DateTime<Utc>) -> CoreResult<Option<Otp>>;
}

#[async_trait]
pub trait CustomerReports: Send + Sync {
  async fn report(&self, predicates: &[Predicate], now: DateTime<Utc>) -> CoreResult<CustomerReport>;
}

/// Connectivity check for the configured store.
#[derive(Debug, Clone)]
pub enum StoreProbe {
  Postgres(PgPool),
  Memory,
}

impl StoreProbe {
  #[instrument(name = "store_probe::ping", skip(self))]
  pub async fn ping(&self) -> Result<()> {
    match self {
      StoreProbe::Postgres(pool) => {
        sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
        Ok(())
      }
      StoreProbe::Memory => Ok(()),
    }
  }
}

/// Every repository the services need, wired to one backend.
#[derive(Clone)]
pub struct Repositories {
  pub orders: Arc<dyn CrudRepository<Order>>,
  pub customers: Arc<dyn CrudRepository<Customer>>,
  pub customer_reports: Arc<dyn CustomerReports>,
  pub users: Arc<dyn UserRepository>,
  pub otps: Arc<dyn OtpRepository>,
  pub probe: StoreProbe,
}

impl Repositories {
  pub fn postgres(pool: PgPool) -> Self {
    let customers = Arc::new(PgCustomerRepository::new(pool.clone()));
    Self {
      orders: Arc::new(PgOrderRepository::new(pool.clone())),
      customers: customers.clone(),
      customer_reports: customers,
      users: Arc::new(PgUserRepository::new(pool.clone())),
      otps: Arc::new(PgOtpRepository::new(pool.clone())),
      probe: StoreProbe::Postgres(pool),
    }
  }

  pub fn memory() -> Self {
    let customers = Arc::new(MemoryTable::<Customer>::new());
    Self {
      orders: Arc::new(MemoryTable::<Order>::new()),
      customers: customers.clone(),
      customer_reports: customers,
      users: Arc::new(MemoryUserRepository::new()),
      otps: Arc::new(MemoryOtpRepository::new()),
      probe: StoreProbe::Memory,
    }
  }
}
