// tests/config_tests.rs

use orderdesk_app::config::{AppConfig, LogFormat, StorageBackend};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
  "STORAGE_BACKEND",
  "DATABASE_URL",
  "JWT_SECRET",
  "RATE_LIMIT_PER_MINUTE",
  "TRUST_FORWARDED_FOR",
  "ENFORCE_OWNERSHIP",
  "LOG_FORMAT",
  "APP_BASE_URL",
];

fn reset_env() {
  for var in VARS {
    env::remove_var(var);
  }
}

#[test]
#[serial]
fn memory_backend_loads_with_defaults() {
  reset_env();
  env::set_var("STORAGE_BACKEND", "memory");
  env::set_var("JWT_SECRET", "from-env");
  env::set_var("APP_BASE_URL", "https://desk.example.com/");
  env::set_var("LOG_FORMAT", "json");

  let config = AppConfig::from_env().expect("config loads");
  assert_eq!(config.storage_backend, StorageBackend::Memory);
  assert_eq!(config.app_base_url, "https://desk.example.com");
  assert_eq!(config.rate_limit_per_minute, 60);
  assert!(!config.enforce_ownership);
  assert!(!config.trust_forwarded_for);
  assert_eq!(config.log_format, LogFormat::Json);
  reset_env();
}

#[test]
#[serial]
fn postgres_backend_requires_database_url() {
  reset_env();
  env::set_var("STORAGE_BACKEND", "postgres");
  env::set_var("JWT_SECRET", "from-env");

  let err = AppConfig::from_env().expect_err("missing DATABASE_URL");
  assert!(err.to_string().contains("DATABASE_URL"));
  reset_env();
}

#[test]
#[serial]
fn bad_numbers_are_reported_by_name() {
  reset_env();
  env::set_var("STORAGE_BACKEND", "memory");
  env::set_var("JWT_SECRET", "from-env");
  env::set_var("RATE_LIMIT_PER_MINUTE", "lots");

  let err = AppConfig::from_env().expect_err("unparsable limit");
  assert!(err.to_string().contains("RATE_LIMIT_PER_MINUTE"));
  reset_env();
}

#[test]
#[serial]
fn forwarded_headers_are_trusted_only_when_enabled() {
  reset_env();
  env::set_var("STORAGE_BACKEND", "memory");
  env::set_var("JWT_SECRET", "from-env");
  env::set_var("TRUST_FORWARDED_FOR", "true");

  let config = AppConfig::from_env().expect("config loads");
  assert!(config.trust_forwarded_for);
  reset_env();
}

#[test]
#[serial]
fn jwt_secret_is_mandatory() {
  reset_env();
  env::set_var("STORAGE_BACKEND", "memory");

  assert!(AppConfig::from_env().is_err());
  reset_env();
}
