// app/src/resources/customer_resource.rs

use serde::Serialize;

use super::timestamp;
use crate::models::Customer;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResource {
  pub customer_id: i64,
  pub user_id: i64,
  pub customer_name: String,
  pub customer_phone: Option<String>,
  pub customer_email: Option<String>,
  pub customer_note: Option<String>,
  pub customer_created_at: String,
  pub customer_updated_at: String,
}

impl From<&Customer> for CustomerResource {
  fn from(customer: &Customer) -> Self {
    Self {
      customer_id: customer.id,
      user_id: customer.user_id,
      customer_name: customer.name.clone(),
      customer_phone: customer.phone.clone(),
      customer_email: customer.email.clone(),
      customer_note: customer.note.clone(),
      customer_created_at: timestamp(&customer.created_at),
      customer_updated_at: timestamp(&customer.updated_at),
    }
  }
}

impl From<Customer> for CustomerResource {
  fn from(customer: Customer) -> Self {
    Self::from(&customer)
  }
}
