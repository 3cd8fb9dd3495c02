use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: Session) -> Result<Session, AuthError>;
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;
  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;
}

/// Password hashing seam; Argon2id in production
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &str) -> Result<String, AuthError>;
  async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError>;
}
