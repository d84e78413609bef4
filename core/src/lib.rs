// src/lib.rs

//! orderdesk: the filterable-list + CRUD pipeline behind the back office API.
//!
//! The crate is storage- and transport-agnostic. It provides:
//!  - A filter translator turning `field[op]=value` query pairs into typed
//!    predicates, restricted by a static per-resource allow-list.
//!  - A declarative request validator with create / replace / patch modes.
//!  - Page requests (clamped to 100 rows), page metadata and link sets.
//!  - Static enum → `{value, label}` lookup tables.
//!  - A generic async `CrudRepository`, an in-memory implementation of it, and
//!    a `CrudService` that turns missing rows into `CoreError::NotFound`.
//!  - The percentage-based price concession calculator.

pub mod concession;
pub mod error;
pub mod filter;
pub mod memory;
pub mod pagination;
pub mod repository;
pub mod resource;
pub mod service;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::error::{CoreError, CoreResult};

pub use crate::filter::{
  FilterField, FilterOperator, FilterSpec, FilterValue, Filterable, Predicate, ValueKind, DATE_FORMAT,
};

pub use crate::validation::{Rule, Validated, ValidationErrors, Validator, WriteMode};

pub use crate::pagination::{Page, PageLinks, PageMeta, PageRequest, MAX_PER_PAGE};
pub use crate::resource::{CollectionBody, LabeledEnum, LabeledValue};

pub use crate::memory::MemoryTable;
pub use crate::repository::{CrudRepository, Record};
pub use crate::service::CrudService;

pub use crate::concession::{ConcessionBreakdown, ConcessionInput};
