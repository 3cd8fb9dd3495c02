use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::customer::{CustomerError, CustomerService};

#[derive(Debug)]
pub struct DeleteCustomerCommand {
  pub user: User,
  pub customer_id: i64,
}

#[derive(Debug)]
pub struct DeleteCustomerResponse {
  pub customer_id: i64,
  /// Name of the deleted customer, echoed back in the success redirect
  pub name: String,
}

pub struct DeleteCustomerUseCase {
  customer_service: Arc<CustomerService>,
}

impl DeleteCustomerUseCase {
  pub fn new(customer_service: Arc<CustomerService>) -> Self {
    Self { customer_service }
  }

  pub async fn execute(
    &self,
    command: DeleteCustomerCommand,
  ) -> Result<DeleteCustomerResponse, CustomerError> {
    let customer = self
      .customer_service
      .delete_customer(&command.user, command.customer_id)
      .await?;

    Ok(DeleteCustomerResponse {
      customer_id: customer.id,
      name: customer.name.into_inner(),
    })
  }
}
