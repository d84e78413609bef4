// core/src/pagination.rs

use serde::Serialize;

/// Upper bound on rows per page, whatever the caller asks for.
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: u32,
  per_page: u32,
}

impl PageRequest {
  /// Page numbers start at 1; `per_page` is clamped to `1..=MAX_PER_PAGE`.
  pub fn new(page: u32, per_page: u32) -> Self {
    Self {
      page: page.max(1),
      per_page: per_page.clamp(1, MAX_PER_PAGE),
    }
  }

  /// Builds a request from loosely-typed query values.
  pub fn from_query(page: Option<i64>, per_page: Option<i64>, default_per_page: u32) -> Self {
    let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32;
    let per_page = per_page
      .map(|n| n.clamp(1, i64::from(MAX_PER_PAGE)) as u32)
      .unwrap_or(default_per_page);
    Self::new(page, per_page)
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn per_page(&self) -> u32 {
    self.per_page
  }

  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.per_page)
  }

  pub fn limit(&self) -> u32 {
    self.per_page
  }
}

/// One page of rows plus the total row count of the filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
  items: Vec<T>,
  total: u64,
  request: PageRequest,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
    Self { items, total, request }
  }

  pub fn items(&self) -> &[T] {
    &self.items
  }

  pub fn into_items(self) -> Vec<T> {
    self.items
  }

  pub fn total(&self) -> u64 {
    self.total
  }

  pub fn current_page(&self) -> u32 {
    self.request.page()
  }

  pub fn per_page(&self) -> u32 {
    self.request.per_page()
  }

  pub fn last_page(&self) -> u32 {
    let per_page = u64::from(self.request.per_page());
    let pages = self.total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
  }

  /// 1-based index of the first row on this page; `None` when empty.
  pub fn first_item(&self) -> Option<u64> {
    (!self.items.is_empty()).then(|| self.request.offset() + 1)
  }

  pub fn last_item(&self) -> Option<u64> {
    self.first_item().map(|first| first + self.items.len() as u64 - 1)
  }

  pub fn has_more_pages(&self) -> bool {
    self.current_page() < self.last_page()
  }

  pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      total: self.total,
      request: self.request,
    }
  }

  pub fn meta(&self) -> PageMeta {
    PageMeta {
      current_page: self.current_page(),
      from: self.first_item(),
      last_page: self.last_page(),
      per_page: self.per_page(),
      to: self.last_item(),
      total: self.total,
    }
  }

  /// Link set for this page. `query` is the request's query string pairs;
  /// every pair except `page` is carried over.
  pub fn links(&self, base_url: &str, query: &[(String, String)]) -> PageLinks {
    let current = self.current_page();
    let last = self.last_page();
    let url = |page: u32| page_url(base_url, query, page);
    PageLinks {
      self_link: url(current),
      first: url(1),
      last: url(last),
      prev: (current > 1).then(|| url(current - 1)),
      next: (current < last).then(|| url(current + 1)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
  pub current_page: u32,
  pub from: Option<u64>,
  pub last_page: u32,
  pub per_page: u32,
  pub to: Option<u64>,
  pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
  #[serde(rename = "self")]
  pub self_link: String,
  pub first: String,
  pub last: String,
  pub prev: Option<String>,
  pub next: Option<String>,
}

fn page_url(base_url: &str, query: &[(String, String)], page: u32) -> String {
  let page = page.to_string();
  let pairs: Vec<(&str, &str)> = query
    .iter()
    .filter(|(k, _)| k != "page")
    .map(|(k, v)| (k.as_str(), v.as_str()))
    .chain(std::iter::once(("page", page.as_str())))
    .collect();
  let encoded = serde_urlencoded::to_string(&pairs).unwrap_or_else(|_| format!("page={page}"));
  format!("{base_url}?{encoded}")
}
