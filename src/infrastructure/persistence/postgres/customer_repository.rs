use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::customer::{
  Customer, CustomerError, CustomerName, ports::CustomerRepository,
};

#[derive(Debug, FromRow)]
struct CustomerRow {
  id: i64,
  org_id: Uuid,
  name: String,
  email: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
  type Error = CustomerError;

  fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
    Ok(Customer {
      id: row.id,
      org_id: row.org_id,
      name: CustomerName::new(row.name)?,
      email: row.email,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresCustomerRepository {
  pool: PgPool,
}

impl PostgresCustomerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
  async fn create(
    &self,
    org_id: Uuid,
    name: CustomerName,
    email: Option<String>,
  ) -> Result<Customer, CustomerError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            INSERT INTO customers (org_id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, org_id, name, email, created_at, updated_at
            "#,
    )
    .bind(org_id)
    .bind(name.value())
    .bind(email)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, customer: Customer) -> Result<Customer, CustomerError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            UPDATE customers
            SET name = $2, email = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, org_id, name, email, created_at, updated_at
            "#,
    )
    .bind(customer.id)
    .bind(customer.name.value())
    .bind(customer.email)
    .bind(customer.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, CustomerError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, org_id, name, email, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_org_id(&self, org_id: Uuid) -> Result<Vec<Customer>, CustomerError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, org_id, name, email, created_at, updated_at
            FROM customers
            WHERE org_id = $1
            ORDER BY name ASC
            "#,
    )
    .bind(org_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn exists_by_name(
    &self,
    org_id: Uuid,
    name: &str,
    exclude_id: Option<i64>,
  ) -> Result<bool, CustomerError> {
    let result = if let Some(exclude_id) = exclude_id {
      sqlx::query_scalar::<_, bool>(
        r#"
                SELECT EXISTS(
                    SELECT 1 FROM customers
                    WHERE org_id = $1 AND name = $2 AND id != $3
                )
                "#,
      )
      .bind(org_id)
      .bind(name)
      .bind(exclude_id)
      .fetch_one(&self.pool)
      .await?
    } else {
      sqlx::query_scalar::<_, bool>(
        r#"
                SELECT EXISTS(
                    SELECT 1 FROM customers
                    WHERE org_id = $1 AND name = $2
                )
                "#,
      )
      .bind(org_id)
      .bind(name)
      .fetch_one(&self.pool)
      .await?
    };

    Ok(result)
  }

  async fn delete_if_unreferenced(&self, id: i64) -> Result<bool, CustomerError> {
    // Single statement, so the invoice check and the delete cannot be
    // interleaved with a concurrent invoice insert.
    let result = sqlx::query(
      r#"
            DELETE FROM customers
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM invoices WHERE customer_id = $1)
            "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected() > 0)
  }
}
