// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Where records live. `Memory` keeps everything in-process (local runs, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
  Postgres,
  Memory,
}

impl FromStr for StorageBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" | "pg" => Ok(StorageBackend::Postgres),
      "memory" => Ok(StorageBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORAGE_BACKEND '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub app_base_url: String,

  pub storage_backend: StorageBackend,
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub run_migrations: bool,

  pub jwt_secret: String,
  pub jwt_ttl_minutes: i64,
  pub otp_ttl_minutes: i64,

  pub rate_limit_per_minute: u32,
  /// Key rate limits on `Forwarded` / `X-Forwarded-For` instead of the socket
  /// peer. Only safe behind a proxy that overwrites those headers.
  pub trust_forwarded_for: bool,
  /// Customer show/update/delete answer 403 to anyone but the owner.
  pub enforce_ownership: bool,

  pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("app_base_url", &self.app_base_url)
      .field("storage_backend", &self.storage_backend)
      .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
      .field("database_max_connections", &self.database_max_connections)
      .field("run_migrations", &self.run_migrations)
      .field("jwt_secret", &"[REDACTED]")
      .field("jwt_ttl_minutes", &self.jwt_ttl_minutes)
      .field("otp_ttl_minutes", &self.otp_ttl_minutes)
      .field("rate_limit_per_minute", &self.rate_limit_per_minute)
      .field("trust_forwarded_for", &self.trust_forwarded_for)
      .field("enforce_ownership", &self.enforce_ownership)
      .field("log_format", &self.log_format)
      .finish()
  }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  let raw = env::var(name).unwrap_or_else(|_| default.to_string());
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e)))
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port: u16 = parse_var("SERVER_PORT", "8080")?;
    let app_base_url = get_env("APP_BASE_URL")
      .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();

    let storage_backend: StorageBackend = parse_var("STORAGE_BACKEND", "postgres")?;
    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    if storage_backend == StorageBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "DATABASE_URL is required when STORAGE_BACKEND=postgres".to_string(),
      ));
    }

    let jwt_secret = get_env("JWT_SECRET")?;
    if jwt_secret.trim().is_empty() {
      return Err(AppError::Config("JWT_SECRET must not be empty".to_string()));
    }

    let log_format = match get_env("LOG_FORMAT").unwrap_or_default().trim().to_ascii_lowercase().as_str() {
      "json" => LogFormat::Json,
      _ => LogFormat::Pretty,
    };

    Ok(Self {
      server_host,
      server_port,
      app_base_url,
      storage_backend,
      database_url,
      database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", "10")?,
      run_migrations: parse_var("RUN_MIGRATIONS", "true")?,
      jwt_secret,
      jwt_ttl_minutes: parse_var("JWT_TTL_MINUTES", "60")?,
      otp_ttl_minutes: parse_var("OTP_TTL_MINUTES", "5")?,
      rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", "60")?,
      trust_forwarded_for: parse_var("TRUST_FORWARDED_FOR", "false")?,
      enforce_ownership: parse_var("ENFORCE_OWNERSHIP", "false")?,
      log_format,
    })
  }

  /// In-memory configuration with defaults, for local runs and tests.
  pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      app_base_url: "http://localhost".to_string(),
      storage_backend: StorageBackend::Memory,
      database_url: None,
      database_max_connections: 1,
      run_migrations: false,
      jwt_secret: jwt_secret.into(),
      jwt_ttl_minutes: 60,
      otp_ttl_minutes: 5,
      rate_limit_per_minute: 60,
      trust_forwarded_for: false,
      enforce_ownership: false,
      log_format: LogFormat::Pretty,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storage_backend_parses_known_names_only() {
    assert_eq!("Postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
    assert_eq!(" memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
    assert!("sqlite".parse::<StorageBackend>().is_err());
  }

  #[test]
  fn debug_output_redacts_secrets() {
    let mut config = AppConfig::in_memory("very-secret");
    config.database_url = Some("postgres://user:pw@host/db".to_string());
    let printed = format!("{:?}", config);
    assert!(!printed.contains("very-secret"));
    assert!(!printed.contains("pw@host"));
  }
}
