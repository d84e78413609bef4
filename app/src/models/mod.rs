// app/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod customer;
pub mod order;
pub mod otp;
pub mod user;

pub use customer::{Customer, CustomerChanges, CustomerDraft, CustomerReport, CUSTOMER_FILTERS};
pub use order::{Order, OrderChanges, OrderDraft, OrderStatus, ORDER_FILTERS};
pub use otp::Otp;
pub use user::{email_taken, NewUser, User, EMAIL_TAKEN_MESSAGE};
