use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::auth::entities::{User, UserRole};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;

#[derive(Debug, FromRow)]
struct UserRow {
  id: Uuid,
  org_id: Uuid,
  email: String,
  password_hash: String,
  full_name: String,
  role: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = AuthError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    let role = UserRole::from_str(&row.role)
      .map_err(|e| AuthError::Internal(format!("Corrupt role column: {}", e)))?;

    Ok(User {
      id: row.id,
      org_id: row.org_id,
      email: row.email,
      password_hash: row.password_hash,
      full_name: row.full_name,
      role,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, org_id, email, password_hash, full_name, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, org_id, email, password_hash, full_name, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }
}
