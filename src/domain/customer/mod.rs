pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Customer, Invoice};
pub use errors::CustomerError;
pub use ports::{CustomerAccessPolicy, CustomerRepository, InvoiceRepository};
pub use services::CustomerService;
pub use value_objects::{CustomerName, ValueObjectError};
