// app/src/services/customer_service.rs

use chrono::Utc;
use orderdesk::{CrudRepository, CrudService, FilterOperator, Page, PageRequest, Predicate};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{Customer, CustomerChanges, CustomerReport, CUSTOMER_FILTERS};
use crate::repositories::CustomerReports;
use crate::requests::customer_request::NewCustomer;

pub const FORBIDDEN_MESSAGE: &str = "This action is unauthorized.";

#[derive(Clone)]
pub struct CustomerService {
  crud: CrudService<Customer>,
  reports: Arc<dyn CustomerReports>,
  enforce_ownership: bool,
}

impl CustomerService {
  pub fn new(
    customers: Arc<dyn CrudRepository<Customer>>,
    reports: Arc<dyn CustomerReports>,
    enforce_ownership: bool,
  ) -> Self {
    Self {
      crud: CrudService::new(customers, &CUSTOMER_FILTERS),
      reports,
      enforce_ownership,
    }
  }

  pub async fn list(&self, query: &[(String, String)], page: PageRequest) -> Result<Page<Customer>> {
    Ok(self.crud.list(query, page).await?)
  }

  pub async fn get(&self, id: i64, caller: i64) -> Result<Customer> {
    let customer = self.crud.get(id).await?;
    self.authorize(&customer, caller)?;
    Ok(customer)
  }

  #[instrument(name = "customer_service::create", skip(self, customer))]
  pub async fn create(&self, caller: i64, customer: NewCustomer) -> Result<Customer> {
    Ok(self.crud.create(customer.into_draft(caller)).await?)
  }

  pub async fn update(&self, id: i64, caller: i64, changes: CustomerChanges) -> Result<Customer> {
    self.get(id, caller).await?;
    Ok(self.crud.update(id, &changes).await?)
  }

  pub async fn delete(&self, id: i64, caller: i64) -> Result<Customer> {
    self.get(id, caller).await?;
    Ok(self.crud.delete(id).await?)
  }

  /// Counts over the filtered customers, limited to `owner` when given.
  #[instrument(name = "customer_service::report", skip(self, query))]
  pub async fn report(&self, query: &[(String, String)], owner: Option<i64>) -> Result<CustomerReport> {
    let mut predicates = CUSTOMER_FILTERS.translate(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if let Some(user_id) = owner {
      predicates.push(Predicate::new("user_id", FilterOperator::Eq, user_id));
    }
    Ok(self.reports.report(&predicates, Utc::now()).await?)
  }

  fn authorize(&self, customer: &Customer, caller: i64) -> Result<()> {
    if self.enforce_ownership && customer.user_id != caller {
      warn!(customer_id = customer.id, caller, "Ownership check failed.");
      return Err(AppError::Forbidden(FORBIDDEN_MESSAGE.to_string()));
    }
    Ok(())
  }
}
