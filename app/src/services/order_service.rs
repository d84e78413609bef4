// app/src/services/order_service.rs

use orderdesk::{CrudRepository, CrudService, Page, PageRequest};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{Customer, Order, OrderChanges, ORDER_FILTERS};
use crate::requests::order_request::{NewOrder, CUSTOMER_MISSING_MESSAGE};

#[derive(Clone)]
pub struct OrderService {
  crud: CrudService<Order>,
  customers: Arc<dyn CrudRepository<Customer>>,
}

impl OrderService {
  pub fn new(orders: Arc<dyn CrudRepository<Order>>, customers: Arc<dyn CrudRepository<Customer>>) -> Self {
    Self {
      crud: CrudService::new(orders, &ORDER_FILTERS),
      customers,
    }
  }

  pub async fn list(&self, query: &[(String, String)], page: PageRequest) -> Result<Page<Order>> {
    Ok(self.crud.list(query, page).await?)
  }

  pub async fn get(&self, id: i64) -> Result<Order> {
    Ok(self.crud.get(id).await?)
  }

  #[instrument(name = "order_service::create", skip_all, fields(customer_id = order.customer_id))]
  pub async fn create(&self, order: NewOrder) -> Result<Order> {
    self.ensure_customer_exists(order.customer_id).await?;
    Ok(self.crud.create(order.into_draft()).await?)
  }

  /// Applies a PUT or PATCH. A missing order wins over an invalid customer.
  #[instrument(name = "order_service::update", skip(self, changes))]
  pub async fn update(&self, id: i64, changes: OrderChanges) -> Result<Order> {
    if let Some(customer_id) = changes.customer_id {
      self.crud.get(id).await?;
      self.ensure_customer_exists(customer_id).await?;
    }
    Ok(self.crud.update(id, &changes).await?)
  }

  pub async fn delete(&self, id: i64) -> Result<Order> {
    Ok(self.crud.delete(id).await?)
  }

  async fn ensure_customer_exists(&self, customer_id: i64) -> Result<()> {
    if self.customers.find(customer_id).await?.is_none() {
      warn!(customer_id, "Order references an unknown customer.");
      return Err(AppError::validation("customerId", CUSTOMER_MISSING_MESSAGE));
    }
    Ok(())
  }
}
