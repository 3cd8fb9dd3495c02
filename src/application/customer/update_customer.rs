use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::customer::{CustomerError, CustomerName, CustomerService};

use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct UpdateCustomerCommand {
  pub user: User,
  pub customer_id: i64,
  pub name: String,
  pub email: Option<String>,
}

pub struct UpdateCustomerUseCase {
  customer_service: Arc<CustomerService>,
}

impl UpdateCustomerUseCase {
  pub fn new(customer_service: Arc<CustomerService>) -> Self {
    Self { customer_service }
  }

  pub async fn execute(
    &self,
    command: UpdateCustomerCommand,
  ) -> Result<CustomerDto, CustomerError> {
    let name = CustomerName::new(command.name)?;
    let email = command.email.filter(|e| !e.trim().is_empty());

    let customer = self
      .customer_service
      .update_customer(&command.user, command.customer_id, name, email)
      .await?;

    Ok(customer.into())
  }
}
