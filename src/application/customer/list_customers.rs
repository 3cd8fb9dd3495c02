use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::customer::{Customer, CustomerError, CustomerService};

#[derive(Debug)]
pub struct ListCustomersCommand {
  pub user: User,
}

#[derive(Debug, Serialize)]
pub struct CustomerDto {
  pub id: i64,
  pub name: String,
  pub email: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
  fn from(customer: Customer) -> Self {
    Self {
      id: customer.id,
      name: customer.name.into_inner(),
      email: customer.email,
      created_at: customer.created_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListCustomersResponse {
  pub customers: Vec<CustomerDto>,
}

pub struct ListCustomersUseCase {
  customer_service: Arc<CustomerService>,
}

impl ListCustomersUseCase {
  pub fn new(customer_service: Arc<CustomerService>) -> Self {
    Self { customer_service }
  }

  pub async fn execute(
    &self,
    command: ListCustomersCommand,
  ) -> Result<ListCustomersResponse, CustomerError> {
    let customers = self.customer_service.list_customers(&command.user).await?;

    Ok(ListCustomersResponse {
      customers: customers.into_iter().map(CustomerDto::from).collect(),
    })
  }
}
