// app/src/web/rate_limit.rs

//! Fixed-window request limiting per client IP.

use actix_web::{
  body::MessageBody,
  dev::{ServiceRequest, ServiceResponse},
  http::header::{HeaderName, HeaderValue},
  middleware::Next,
  web, Error,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::warn;

use super::envelope;
use crate::errors::AppError;
use crate::state::AppState;

/// Expired buckets are swept once more than this many keys are tracked.
const STALE_BUCKET_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
  started: Instant,
  count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
  pub allowed: bool,
  pub limit: u32,
  pub remaining: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
  limit: u32,
  window: Duration,
  buckets: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
  pub fn new(limit: u32, window: Duration) -> Self {
    Self {
      limit: limit.max(1),
      window,
      buckets: Mutex::new(HashMap::new()),
    }
  }

  pub fn per_minute(limit: u32) -> Self {
    Self::new(limit, Duration::from_secs(60))
  }

  pub fn check(&self, key: &str) -> RateDecision {
    self.check_at(key, Instant::now())
  }

  pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
    let mut buckets = self.buckets.lock();
    if buckets.len() > STALE_BUCKET_THRESHOLD {
      let window = self.window;
      buckets.retain(|_, w| now.duration_since(w.started) < window);
    }

    let bucket = buckets.entry(key.to_string()).or_insert(Window { started: now, count: 0 });
    if now.duration_since(bucket.started) >= self.window {
      *bucket = Window { started: now, count: 0 };
    }

    let allowed = bucket.count < self.limit;
    if allowed {
      bucket.count += 1;
    }
    RateDecision {
      allowed,
      limit: self.limit,
      remaining: self.limit - bucket.count,
    }
  }

  /// Forgets every bucket; returns how many there were.
  pub fn clear(&self) -> usize {
    let mut buckets = self.buckets.lock();
    let cleared = buckets.len();
    buckets.clear();
    cleared
  }
}

/// The caller's address without the port, `"unknown"` when not available.
///
/// The socket peer is used unless `trust_forwarded` is set, in which case
/// `Forwarded` / `X-Forwarded-For` win when present.
pub fn client_ip(req: &actix_web::HttpRequest, trust_forwarded: bool) -> String {
  if trust_forwarded {
    if let Some(addr) = req.connection_info().realip_remote_addr() {
      return addr
        .parse::<SocketAddr>()
        .map(|socket| socket.ip().to_string())
        .unwrap_or_else(|_| addr.to_string());
    }
  }
  req
    .peer_addr()
    .map(|socket| socket.ip().to_string())
    .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(
  req: ServiceRequest,
  next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
  let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
    return next.call(req).await.map(ServiceResponse::map_into_left_body);
  };

  let key = client_ip(req.request(), state.config.trust_forwarded_for);
  let decision = state.rate_limiter.check(&key);

  if !decision.allowed {
    warn!(client = %key, limit = decision.limit, "Rate limit exceeded.");
    let (http_req, _payload) = req.into_parts();
    let mut response = envelope::failure(&http_req, &AppError::TooManyRequests);
    insert_headers(response.headers_mut(), decision);
    return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
  }

  let mut response = next.call(req).await?;
  insert_headers(response.headers_mut(), decision);
  Ok(response.map_into_left_body())
}

fn insert_headers(headers: &mut actix_web::http::header::HeaderMap, decision: RateDecision) {
  headers.insert(
    HeaderName::from_static("x-ratelimit-limit"),
    HeaderValue::from(decision.limit),
  );
  headers.insert(
    HeaderName::from_static("x-ratelimit-remaining"),
    HeaderValue::from(decision.remaining),
  );
}
