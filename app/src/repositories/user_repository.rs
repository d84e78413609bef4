// app/src/repositories/user_repository.rs

use async_trait::async_trait;
use chrono::Utc;
use orderdesk::{CoreError, CoreResult};
use parking_lot::Mutex;
use sqlx::PgPool;
use tracing::{instrument, warn};

use super::UserRepository;
use crate::models::{email_taken, NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// A concurrent register can pass the email lookup and still lose the
/// insert to the `users.email` unique index.
fn map_create_error(err: sqlx::Error) -> CoreError {
  match &err {
    sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
      warn!(constraint = ?db.constraint(), "Registration lost a race on the email index.");
      email_taken()
    }
    _ => CoreError::storage("users.create", err),
  }
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
  pool: PgPool,
}

impl PgUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for PgUserRepository {
  #[instrument(name = "pg_users::create", skip_all, fields(email = %user.email))]
  async fn create(&self, user: NewUser) -> CoreResult<User> {
    sqlx::query_as::<_, User>(&format!(
      "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
      USER_COLUMNS
    ))
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .fetch_one(&self.pool)
    .await
    .map_err(map_create_error)
  }

  async fn find(&self, id: i64) -> CoreResult<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| CoreError::storage("users.find", e))
  }

  async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(email)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| CoreError::storage("users.find_by_email", e))
  }

  async fn update_name(&self, id: i64, name: &str) -> CoreResult<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
      "UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
      USER_COLUMNS
    ))
    .bind(id)
    .bind(name)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| CoreError::storage("users.update_name", e))
  }
}

/// Users held in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
  users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
  async fn create(&self, user: NewUser) -> CoreResult<User> {
    let mut users = self.users.lock();
    if users.iter().any(|u| u.email == user.email) {
      return Err(email_taken());
    }
    let now = Utc::now();
    let created = User {
      id: users.last().map_or(1, |u| u.id + 1),
      name: user.name,
      email: user.email,
      password_hash: user.password_hash,
      created_at: now,
      updated_at: now,
    };
    users.push(created.clone());
    Ok(created)
  }

  async fn find(&self, id: i64) -> CoreResult<Option<User>> {
    Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
    Ok(self.users.lock().iter().find(|u| u.email == email).cloned())
  }

  async fn update_name(&self, id: i64, name: &str) -> CoreResult<Option<User>> {
    let mut users = self.users.lock();
    let Some(user) = users.iter_mut().find(|u| u.id == id) else {
      return Ok(None);
    };
    user.name = name.to_string();
    user.updated_at = Utc::now();
    Ok(Some(user.clone()))
  }
}
