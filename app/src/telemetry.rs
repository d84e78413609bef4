// app/src/telemetry.rs

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::config::LogFormat;

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}
