//! In-memory ports implementations for unit tests and local experiments.

pub mod auth;
pub mod customers;

pub use auth::{InMemorySessionRepository, InMemoryUserRepository, PlainTextHasher};
pub use customers::{
  InMemoryAccessPolicy, InMemoryCustomerRepository, InMemoryInvoiceRepository,
};
