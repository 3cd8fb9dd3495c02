pub mod create_customer;
pub mod delete_customer;
pub mod get_customer_details;
pub mod list_customers;
pub mod update_customer;

pub use create_customer::{CreateCustomerCommand, CreateCustomerUseCase};
pub use delete_customer::{DeleteCustomerCommand, DeleteCustomerResponse, DeleteCustomerUseCase};
pub use get_customer_details::{
  CustomerDetailsResponse, GetCustomerDetailsCommand, GetCustomerDetailsUseCase, InvoiceDto,
};
pub use list_customers::{
  CustomerDto, ListCustomersCommand, ListCustomersResponse, ListCustomersUseCase,
};
pub use update_customer::{UpdateCustomerCommand, UpdateCustomerUseCase};
