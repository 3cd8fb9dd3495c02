use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role assigned to a panel user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  /// Permitted to perform destructive operations
  Admin,
  /// Read/write access without destructive operations
  Staff,
}

impl UserRole {
  pub fn is_admin(&self) -> bool {
    matches!(self, UserRole::Admin)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      UserRole::Admin => "admin",
      UserRole::Staff => "staff",
    }
  }
}

impl std::str::FromStr for UserRole {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "admin" => Ok(UserRole::Admin),
      "staff" => Ok(UserRole::Staff),
      other => Err(format!("Unknown role: {}", other)),
    }
  }
}

impl fmt::Display for UserRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Panel user. Provisioned out of band; there is no self-registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  /// Organization whose records this user may act on
  pub org_id: Uuid,
  pub email: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub full_name: String,
  pub role: UserRole,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(
    org_id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    role: UserRole,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      org_id,
      email,
      password_hash,
      full_name,
      role,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Active login session. Only the SHA-256 hash of the token is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at: Utc::now() + duration,
      created_at: Utc::now(),
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_session_expiry() {
    let fresh = Session::with_duration(Uuid::new_v4(), "hash".to_string(), Duration::hours(1));
    assert!(!fresh.is_expired());

    let stale = Session::with_duration(Uuid::new_v4(), "hash".to_string(), Duration::seconds(-1));
    assert!(stale.is_expired());
  }

  #[test]
  fn test_role_parsing() {
    assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
    assert_eq!("staff".parse::<UserRole>().unwrap(), UserRole::Staff);
    assert!("root".parse::<UserRole>().is_err());
    assert!(UserRole::Admin.is_admin());
    assert!(!UserRole::Staff.is_admin());
  }
}
