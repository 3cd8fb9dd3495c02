use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::customer::{CustomerError, CustomerName, CustomerService};

use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct CreateCustomerCommand {
  pub user: User,
  pub name: String,
  pub email: Option<String>,
}

pub struct CreateCustomerUseCase {
  customer_service: Arc<CustomerService>,
}

impl CreateCustomerUseCase {
  pub fn new(customer_service: Arc<CustomerService>) -> Self {
    Self { customer_service }
  }

  pub async fn execute(
    &self,
    command: CreateCustomerCommand,
  ) -> Result<CustomerDto, CustomerError> {
    let name = CustomerName::new(command.name)?;
    let email = command.email.filter(|e| !e.trim().is_empty());

    let customer = self
      .customer_service
      .create_customer(&command.user, name, email)
      .await?;

    Ok(customer.into())
  }
}
