// app/src/resources/user_resource.rs

use serde::Serialize;

use super::timestamp;
use crate::models::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
  pub id: i64,
  pub name: String,
  pub email: String,
  pub created_at: String,
  pub updated_at: String,
}

impl From<&User> for UserResource {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      name: user.name.clone(),
      email: user.email.clone(),
      created_at: timestamp(&user.created_at),
      updated_at: timestamp(&user.updated_at),
    }
  }
}
