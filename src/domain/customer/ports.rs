use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Customer, Invoice};
use super::errors::CustomerError;
use super::value_objects::CustomerName;

use crate::domain::auth::entities::User;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
  async fn create(
    &self,
    org_id: Uuid,
    name: CustomerName,
    email: Option<String>,
  ) -> Result<Customer, CustomerError>;
  async fn update(&self, customer: Customer) -> Result<Customer, CustomerError>;
  async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, CustomerError>;
  async fn find_by_org_id(&self, org_id: Uuid) -> Result<Vec<Customer>, CustomerError>;
  async fn exists_by_name(
    &self,
    org_id: Uuid,
    name: &str,
    exclude_id: Option<i64>,
  ) -> Result<bool, CustomerError>;

  /// Deletes the customer only while no invoice references it, in a single
  /// statement. Returns `false` when nothing was deleted, either because the
  /// record is gone or because an invoice got attached since the caller last
  /// looked.
  async fn delete_if_unreferenced(&self, id: i64) -> Result<bool, CustomerError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn count_by_customer_id(&self, customer_id: i64) -> Result<i64, CustomerError>;
  async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Invoice>, CustomerError>;
}

/// Resource ownership check: restricts which callers may act on a specific
/// customer record. The check is keyed on the identifier alone so it can run
/// before the record itself is loaded; an identifier that resolves to no
/// record passes (there is nothing to protect yet).
#[async_trait]
pub trait CustomerAccessPolicy: Send + Sync {
  async fn authorize(&self, user: &User, customer_id: i64) -> Result<(), CustomerError>;
}
