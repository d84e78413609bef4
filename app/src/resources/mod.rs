// app/src/resources/mod.rs

//! External JSON shapes of the stored entities.

pub mod customer_resource;
pub mod order_resource;
pub mod user_resource;

pub use customer_resource::CustomerResource;
pub use order_resource::OrderResource;
pub use user_resource::UserResource;

use chrono::{DateTime, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
  at.format(TIMESTAMP_FORMAT).to_string()
}
