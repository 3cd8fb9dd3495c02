use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::CustomerName;

// Customer - Client record managed by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  /// Database-assigned identifier, unique across the panel
  pub id: i64,
  /// Organization that owns this record
  pub org_id: Uuid,
  pub name: CustomerName,
  pub email: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Customer {
  pub fn update(&mut self, name: CustomerName, email: Option<String>) {
    self.name = name;
    self.email = email;
    self.updated_at = Utc::now();
  }
}

// Invoice - Billing document referencing exactly one customer.
// Read-only within the panel; a customer with at least one invoice
// must never be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: i64,
  pub customer_id: i64,
  pub number: String,
  pub issued_on: NaiveDate,
  pub total: Decimal,
  pub created_at: DateTime<Utc>,
}
