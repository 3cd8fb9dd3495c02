use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::customer::{CustomerError, ports::CustomerAccessPolicy};

/// Ownership check against the customers table: a record owned by another
/// organization blocks access, an identifier with no record passes through
/// so the caller can surface its own not-found handling.
pub struct PostgresAccessPolicy {
  pool: PgPool,
}

impl PostgresAccessPolicy {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CustomerAccessPolicy for PostgresAccessPolicy {
  async fn authorize(&self, user: &User, customer_id: i64) -> Result<(), CustomerError> {
    let owner = sqlx::query_scalar::<_, Uuid>(
      r#"
            SELECT org_id FROM customers WHERE id = $1
            "#,
    )
    .bind(customer_id)
    .fetch_optional(&self.pool)
    .await?;

    match owner {
      Some(org_id) if org_id != user.org_id => {
        tracing::warn!(
          customer_id,
          user_id = %user.id,
          "Denied access to customer owned by another organization"
        );
        Err(CustomerError::PermissionDenied(
          "Customer belongs to another organization".to_string(),
        ))
      }
      _ => Ok(()),
    }
  }
}
