use std::sync::Arc;

use crate::domain::auth::entities::User;

use super::entities::{Customer, Invoice};
use super::errors::CustomerError;
use super::ports::{CustomerAccessPolicy, CustomerRepository, InvoiceRepository};
use super::value_objects::CustomerName;

pub struct CustomerService {
  customer_repo: Arc<dyn CustomerRepository>,
  invoice_repo: Arc<dyn InvoiceRepository>,
  access_policy: Arc<dyn CustomerAccessPolicy>,
}

impl CustomerService {
  pub fn new(
    customer_repo: Arc<dyn CustomerRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    access_policy: Arc<dyn CustomerAccessPolicy>,
  ) -> Self {
    Self {
      customer_repo,
      invoice_repo,
      access_policy,
    }
  }

  pub async fn create_customer(
    &self,
    user: &User,
    name: CustomerName,
    email: Option<String>,
  ) -> Result<Customer, CustomerError> {
    if self
      .customer_repo
      .exists_by_name(user.org_id, name.value(), None)
      .await?
    {
      return Err(CustomerError::NameAlreadyExists);
    }

    self.customer_repo.create(user.org_id, name, email).await
  }

  pub async fn update_customer(
    &self,
    user: &User,
    customer_id: i64,
    name: CustomerName,
    email: Option<String>,
  ) -> Result<Customer, CustomerError> {
    self.access_policy.authorize(user, customer_id).await?;

    let mut customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(CustomerError::NotFound(customer_id))?;

    if self
      .customer_repo
      .exists_by_name(customer.org_id, name.value(), Some(customer_id))
      .await?
    {
      return Err(CustomerError::NameAlreadyExists);
    }

    customer.update(name, email);
    self.customer_repo.update(customer).await
  }

  pub async fn get_customer(
    &self,
    user: &User,
    customer_id: i64,
  ) -> Result<(Customer, Vec<Invoice>), CustomerError> {
    self.access_policy.authorize(user, customer_id).await?;

    let customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(CustomerError::NotFound(customer_id))?;

    let invoices = self.invoice_repo.find_by_customer_id(customer_id).await?;

    Ok((customer, invoices))
  }

  pub async fn list_customers(&self, user: &User) -> Result<Vec<Customer>, CustomerError> {
    self.customer_repo.find_by_org_id(user.org_id).await
  }

  /// Deletes a customer record. The caller must hold the Admin role and pass
  /// the ownership check for this specific record; both checks run before the
  /// record is even loaded, so an authorization failure takes precedence over
  /// a not-found condition.
  ///
  /// A customer with at least one referencing invoice is never deleted; there
  /// is no cascade and no force option. The delete itself is conditional on
  /// the invoice check still holding, so an invoice inserted between the
  /// count and the delete surfaces as `DeleteFailed` instead of breaking the
  /// invariant.
  ///
  /// Returns the deleted customer.
  pub async fn delete_customer(
    &self,
    user: &User,
    customer_id: i64,
  ) -> Result<Customer, CustomerError> {
    if !user.role.is_admin() {
      return Err(CustomerError::PermissionDenied(
        "Only administrators may delete customers".to_string(),
      ));
    }

    self.access_policy.authorize(user, customer_id).await?;

    let customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(CustomerError::NotFound(customer_id))?;

    let invoice_count = self.invoice_repo.count_by_customer_id(customer_id).await?;
    if invoice_count > 0 {
      return Err(CustomerError::HasInvoices {
        customer_id,
        invoice_count,
      });
    }

    let deleted = self
      .customer_repo
      .delete_if_unreferenced(customer_id)
      .await
      .map_err(|e| CustomerError::DeleteFailed(e.to_string()))?;

    if !deleted {
      // Either the record vanished or an invoice got attached since the
      // count above; both ways the delete did not happen.
      return Err(CustomerError::DeleteFailed(format!(
        "Customer {} was not deleted",
        customer_id
      )));
    }

    tracing::info!(
      customer_id,
      user_id = %user.id,
      "Customer deleted"
    );

    Ok(customer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::UserRole;
  use crate::infrastructure::persistence::memory::{
    InMemoryAccessPolicy, InMemoryCustomerRepository, InMemoryInvoiceRepository,
  };
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn admin_for(org_id: Uuid) -> User {
    User::new(
      org_id,
      "admin@example.com".to_string(),
      "hash".to_string(),
      "Admin".to_string(),
      UserRole::Admin,
    )
  }

  fn staff_for(org_id: Uuid) -> User {
    User::new(
      org_id,
      "staff@example.com".to_string(),
      "hash".to_string(),
      "Staff".to_string(),
      UserRole::Staff,
    )
  }

  fn service_with(
    customers: Arc<InMemoryCustomerRepository>,
    invoices: Arc<InMemoryInvoiceRepository>,
  ) -> CustomerService {
    let policy = Arc::new(InMemoryAccessPolicy::new(customers.clone()));
    CustomerService::new(customers, invoices, policy)
  }

  async fn seed_customer(
    repo: &InMemoryCustomerRepository,
    org_id: Uuid,
    name: &str,
  ) -> Customer {
    repo
      .create(org_id, CustomerName::new(name).unwrap(), None)
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_delete_customer_without_invoices_succeeds() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let org_id = Uuid::new_v4();
    let admin = admin_for(org_id);

    let customer = seed_customer(&customers, org_id, "Acme Co").await;
    let service = service_with(customers.clone(), invoices);

    let deleted = service.delete_customer(&admin, customer.id).await.unwrap();
    assert_eq!(deleted.name.value(), "Acme Co");
    assert!(customers.find_by_id(customer.id).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_delete_customer_with_invoices_is_blocked() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let org_id = Uuid::new_v4();
    let admin = admin_for(org_id);

    let customer = seed_customer(&customers, org_id, "Acme Co").await;
    for n in 1..=3 {
      invoices.insert(
        customer.id,
        format!("INV-{:04}", n),
        NaiveDate::from_ymd_opt(2024, 1, n as u32).unwrap(),
        dec!(100.00),
      );
    }
    customers.link_invoices(invoices.clone());

    let service = service_with(customers.clone(), invoices);

    let err = service
      .delete_customer(&admin, customer.id)
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      CustomerError::HasInvoices {
        invoice_count: 3,
        ..
      }
    ));
    // The customer must still exist afterwards
    assert!(customers.find_by_id(customer.id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_delete_nonexistent_customer_is_not_found() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let admin = admin_for(Uuid::new_v4());

    let service = service_with(customers, invoices.clone());

    let err = service.delete_customer(&admin, 404).await.unwrap_err();
    assert!(matches!(err, CustomerError::NotFound(404)));
    // Not-found is decided before the invoice check runs
    assert_eq!(invoices.count_calls(), 0);
  }

  #[tokio::test]
  async fn test_delete_requires_admin_role() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let org_id = Uuid::new_v4();
    let staff = staff_for(org_id);

    let customer = seed_customer(&customers, org_id, "Acme Co").await;
    let service = service_with(customers.clone(), invoices.clone());

    let err = service
      .delete_customer(&staff, customer.id)
      .await
      .unwrap_err();
    assert!(matches!(err, CustomerError::PermissionDenied(_)));
    // The handler terminates before the invoice count or delete step
    assert_eq!(invoices.count_calls(), 0);
    assert!(customers.find_by_id(customer.id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_delete_blocked_for_foreign_org_before_existence_check() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let owner_org = Uuid::new_v4();
    let other_admin = admin_for(Uuid::new_v4());

    let customer = seed_customer(&customers, owner_org, "Acme Co").await;
    let service = service_with(customers.clone(), invoices.clone());

    let err = service
      .delete_customer(&other_admin, customer.id)
      .await
      .unwrap_err();
    assert!(matches!(err, CustomerError::PermissionDenied(_)));
    assert_eq!(invoices.count_calls(), 0);
    assert!(customers.find_by_id(customer.id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_invoice_attached_between_check_and_delete_fails_delete() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let org_id = Uuid::new_v4();
    let admin = admin_for(org_id);

    let customer = seed_customer(&customers, org_id, "Acme Co").await;
    // Simulate an invoice landing after the count but before the delete
    customers.refuse_deletes();

    let service = service_with(customers.clone(), invoices);

    let err = service
      .delete_customer(&admin, customer.id)
      .await
      .unwrap_err();
    assert!(matches!(err, CustomerError::DeleteFailed(_)));
    assert!(customers.find_by_id(customer.id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_create_customer_rejects_duplicate_name() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let org_id = Uuid::new_v4();
    let admin = admin_for(org_id);

    seed_customer(&customers, org_id, "Acme Co").await;
    let service = service_with(customers, invoices);

    let err = service
      .create_customer(&admin, CustomerName::new("Acme Co").unwrap(), None)
      .await
      .unwrap_err();
    assert!(matches!(err, CustomerError::NameAlreadyExists));
  }

  #[tokio::test]
  async fn test_get_customer_returns_invoices() {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let org_id = Uuid::new_v4();
    let admin = admin_for(org_id);

    let customer = seed_customer(&customers, org_id, "Acme Co").await;
    invoices.insert(
      customer.id,
      "INV-0001".to_string(),
      NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
      dec!(250.00),
    );

    let service = service_with(customers, invoices);

    let (found, found_invoices) = service.get_customer(&admin, customer.id).await.unwrap();
    assert_eq!(found.id, customer.id);
    assert_eq!(found_invoices.len(), 1);
    assert_eq!(found_invoices[0].number, "INV-0001");
  }
}
