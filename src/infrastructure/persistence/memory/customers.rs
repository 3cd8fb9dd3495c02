use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::customer::{
  Customer, CustomerAccessPolicy, CustomerError, CustomerName, CustomerRepository, Invoice,
  InvoiceRepository,
};

/// In-memory customer store. Counts every port-method invocation so tests
/// can assert that a code path touched storage exactly as often as intended.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
  state: Mutex<HashMap<i64, Customer>>,
  invoices: Mutex<Option<Arc<InMemoryInvoiceRepository>>>,
  next_id: AtomicI64,
  refuse_deletes: AtomicBool,
  calls: AtomicUsize,
}

impl InMemoryCustomerRepository {
  pub fn new() -> Self {
    Self {
      next_id: AtomicI64::new(1),
      ..Self::default()
    }
  }

  /// Makes `delete_if_unreferenced` honor the invoice store, so tests can
  /// exercise the referential guard end to end.
  pub fn link_invoices(&self, invoices: Arc<InMemoryInvoiceRepository>) {
    *self.invoices.lock().unwrap() = Some(invoices);
  }

  /// Forces the next conditional deletes to report zero affected rows, the
  /// way a concurrently attached invoice would.
  pub fn refuse_deletes(&self) {
    self.refuse_deletes.store(true, Ordering::SeqCst);
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  /// Owner lookup for the access policy; not a store call from the
  /// handler's point of view, so it does not bump the counter.
  pub(crate) fn owning_org(&self, customer_id: i64) -> Option<Uuid> {
    self
      .state
      .lock()
      .unwrap()
      .get(&customer_id)
      .map(|c| c.org_id)
  }

  fn bump(&self) {
    self.calls.fetch_add(1, Ordering::SeqCst);
  }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
  async fn create(
    &self,
    org_id: Uuid,
    name: CustomerName,
    email: Option<String>,
  ) -> Result<Customer, CustomerError> {
    self.bump();
    let now = Utc::now();
    let customer = Customer {
      id: self.next_id.fetch_add(1, Ordering::SeqCst),
      org_id,
      name,
      email,
      created_at: now,
      updated_at: now,
    };
    self
      .state
      .lock()
      .unwrap()
      .insert(customer.id, customer.clone());
    Ok(customer)
  }

  async fn update(&self, customer: Customer) -> Result<Customer, CustomerError> {
    self.bump();
    let mut state = self.state.lock().unwrap();
    if !state.contains_key(&customer.id) {
      return Err(CustomerError::NotFound(customer.id));
    }
    state.insert(customer.id, customer.clone());
    Ok(customer)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, CustomerError> {
    self.bump();
    Ok(self.state.lock().unwrap().get(&id).cloned())
  }

  async fn find_by_org_id(&self, org_id: Uuid) -> Result<Vec<Customer>, CustomerError> {
    self.bump();
    let mut customers: Vec<Customer> = self
      .state
      .lock()
      .unwrap()
      .values()
      .filter(|c| c.org_id == org_id)
      .cloned()
      .collect();
    customers.sort_by(|a, b| a.name.value().cmp(b.name.value()));
    Ok(customers)
  }

  async fn exists_by_name(
    &self,
    org_id: Uuid,
    name: &str,
    exclude_id: Option<i64>,
  ) -> Result<bool, CustomerError> {
    self.bump();
    Ok(self.state.lock().unwrap().values().any(|c| {
      c.org_id == org_id && c.name.value() == name && Some(c.id) != exclude_id
    }))
  }

  async fn delete_if_unreferenced(&self, id: i64) -> Result<bool, CustomerError> {
    self.bump();
    if self.refuse_deletes.load(Ordering::SeqCst) {
      return Ok(false);
    }
    if let Some(invoices) = self.invoices.lock().unwrap().as_ref() {
      if invoices.reference_count(id) > 0 {
        return Ok(false);
      }
    }
    Ok(self.state.lock().unwrap().remove(&id).is_some())
  }
}

/// In-memory invoice store; read-only through the port, seeded via `insert`.
#[derive(Default)]
pub struct InMemoryInvoiceRepository {
  state: Mutex<Vec<Invoice>>,
  next_id: AtomicI64,
  count_calls: AtomicUsize,
}

impl InMemoryInvoiceRepository {
  pub fn new() -> Self {
    Self {
      next_id: AtomicI64::new(1),
      ..Self::default()
    }
  }

  pub fn insert(
    &self,
    customer_id: i64,
    number: String,
    issued_on: NaiveDate,
    total: Decimal,
  ) -> Invoice {
    let invoice = Invoice {
      id: self.next_id.fetch_add(1, Ordering::SeqCst),
      customer_id,
      number,
      issued_on,
      total,
      created_at: Utc::now(),
    };
    self.state.lock().unwrap().push(invoice.clone());
    invoice
  }

  /// Number of times the referential check was consulted
  pub fn count_calls(&self) -> usize {
    self.count_calls.load(Ordering::SeqCst)
  }

  pub(crate) fn reference_count(&self, customer_id: i64) -> i64 {
    self
      .state
      .lock()
      .unwrap()
      .iter()
      .filter(|i| i.customer_id == customer_id)
      .count() as i64
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn count_by_customer_id(&self, customer_id: i64) -> Result<i64, CustomerError> {
    self.count_calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.reference_count(customer_id))
  }

  async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Invoice>, CustomerError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .iter()
        .filter(|i| i.customer_id == customer_id)
        .cloned()
        .collect(),
    )
  }
}

/// Ownership check backed by the in-memory customer store: access is denied
/// when the record belongs to another organization, and passes when the
/// record does not exist at all.
pub struct InMemoryAccessPolicy {
  customers: Arc<InMemoryCustomerRepository>,
}

impl InMemoryAccessPolicy {
  pub fn new(customers: Arc<InMemoryCustomerRepository>) -> Self {
    Self { customers }
  }
}

#[async_trait]
impl CustomerAccessPolicy for InMemoryAccessPolicy {
  async fn authorize(&self, user: &User, customer_id: i64) -> Result<(), CustomerError> {
    match self.customers.owning_org(customer_id) {
      Some(org_id) if org_id != user.org_id => Err(CustomerError::PermissionDenied(
        "Customer belongs to another organization".to_string(),
      )),
      _ => Ok(()),
    }
  }
}
