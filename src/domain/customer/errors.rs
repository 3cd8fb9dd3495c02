use thiserror::Error;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum CustomerError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Customer not found: {0}")]
  NotFound(i64),

  #[error("Customer name already exists for organization")]
  NameAlreadyExists,

  #[error("Customer {customer_id} has {invoice_count} invoice(s) and cannot be deleted")]
  HasInvoices { customer_id: i64, invoice_count: i64 },

  #[error("Failed to delete customer: {0}")]
  DeleteFailed(String),

  #[error("Permission denied: {0}")]
  PermissionDenied(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
