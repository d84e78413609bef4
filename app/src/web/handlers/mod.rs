// app/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod check_handlers;
pub mod concession_handlers;
pub mod order_handlers;
pub mod task_handlers;

use actix_web::HttpRequest;
use orderdesk::{CollectionBody, Page, PageRequest};
use serde::Serialize;

use crate::state::AppState;

/// Raw query pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Reads `page` and `per_page`; unparsable values fall back to defaults.
pub fn page_request(query: &[(String, String)], default_per_page: u32) -> PageRequest {
  let number = |name: &str| {
    query
      .iter()
      .find(|(key, _)| key == name)
      .and_then(|(_, value)| value.trim().parse::<i64>().ok())
  };
  PageRequest::from_query(number("page"), number("per_page"), default_per_page)
}

/// `true` for `1`, `true`, `on` and `yes`.
pub fn query_flag(query: &[(String, String)], name: &str) -> bool {
  query
    .iter()
    .find(|(key, _)| key == name)
    .is_some_and(|(_, value)| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes"))
}

/// Wraps a page of formatted rows with meta and links that point back at
/// this route.
pub fn collection<T: Serialize>(
  state: &AppState,
  req: &HttpRequest,
  page: Page<T>,
  message: &str,
  query: &[(String, String)],
) -> CollectionBody<T> {
  let base_url = format!("{}{}", state.config.app_base_url, req.path());
  CollectionBody::from_page(page, message, &base_url, query)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
    raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn page_request_clamps_and_defaults() {
    let request = page_request(&pairs(&[("per_page", "1000"), ("page", "2")]), 10);
    assert_eq!(request.per_page(), 100);
    assert_eq!(request.page(), 2);

    let fallback = page_request(&pairs(&[("per_page", "lots")]), 15);
    assert_eq!(fallback.per_page(), 15);
    assert_eq!(fallback.page(), 1);
  }

  #[test]
  fn query_flag_accepts_truthy_spellings() {
    assert!(query_flag(&pairs(&[("all", "true")]), "all"));
    assert!(query_flag(&pairs(&[("all", "1")]), "all"));
    assert!(!query_flag(&pairs(&[("all", "0")]), "all"));
    assert!(!query_flag(&pairs(&[]), "all"));
  }
}
