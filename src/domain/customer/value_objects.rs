use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid customer name: {0}")]
  InvalidCustomerName(String),
}

// Customer Name - Required, human-entered text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerName(
        "Customer name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidCustomerName(
        "Customer name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for CustomerName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_customer_name_valid() {
    let name = CustomerName::new("Acme Co").unwrap();
    assert_eq!(name.value(), "Acme Co");
  }

  #[test]
  fn test_customer_name_trims_whitespace() {
    let name = CustomerName::new("  Acme Co  ").unwrap();
    assert_eq!(name.value(), "Acme Co");
  }

  #[test]
  fn test_customer_name_rejects_empty() {
    assert!(CustomerName::new("").is_err());
    assert!(CustomerName::new("   ").is_err());
  }

  #[test]
  fn test_customer_name_rejects_too_long() {
    let long_name = "a".repeat(256);
    assert!(CustomerName::new(long_name).is_err());
  }
}
