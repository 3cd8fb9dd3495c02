use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::customer::{CustomerError, CustomerService, Invoice};

use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct GetCustomerDetailsCommand {
  pub user: User,
  pub customer_id: i64,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDto {
  pub id: i64,
  pub number: String,
  pub issued_on: NaiveDate,
  pub total: Decimal,
}

impl From<Invoice> for InvoiceDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      number: invoice.number,
      issued_on: invoice.issued_on,
      total: invoice.total,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailsResponse {
  pub customer: CustomerDto,
  pub invoices: Vec<InvoiceDto>,
  pub invoice_count: usize,
}

pub struct GetCustomerDetailsUseCase {
  customer_service: Arc<CustomerService>,
}

impl GetCustomerDetailsUseCase {
  pub fn new(customer_service: Arc<CustomerService>) -> Self {
    Self { customer_service }
  }

  pub async fn execute(
    &self,
    command: GetCustomerDetailsCommand,
  ) -> Result<CustomerDetailsResponse, CustomerError> {
    let (customer, invoices) = self
      .customer_service
      .get_customer(&command.user, command.customer_id)
      .await?;

    let invoice_count = invoices.len();

    Ok(CustomerDetailsResponse {
      customer: customer.into(),
      invoices: invoices.into_iter().map(InvoiceDto::from).collect(),
      invoice_count,
    })
  }
}
