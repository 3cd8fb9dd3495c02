use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::domain::customer::{CustomerError, Invoice, ports::InvoiceRepository};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: i64,
  customer_id: i64,
  number: String,
  issued_on: NaiveDate,
  total: Decimal,
  created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
  fn from(row: InvoiceRow) -> Self {
    Invoice {
      id: row.id,
      customer_id: row.customer_id,
      number: row.number,
      issued_on: row.issued_on,
      total: row.total,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn count_by_customer_id(&self, customer_id: i64) -> Result<i64, CustomerError> {
    let count = sqlx::query_scalar::<_, i64>(
      r#"
            SELECT COUNT(*) FROM invoices WHERE customer_id = $1
            "#,
    )
    .bind(customer_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(count)
  }

  async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Invoice>, CustomerError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, customer_id, number, issued_on, total, created_at
            FROM invoices
            WHERE customer_id = $1
            ORDER BY issued_on DESC, id DESC
            "#,
    )
    .bind(customer_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Invoice::from).collect())
  }
}
