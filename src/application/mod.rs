//! Application layer
//!
//! Use cases that orchestrate domain services into application-specific
//! workflows, one file per operation.

pub mod auth;
pub mod customer;
