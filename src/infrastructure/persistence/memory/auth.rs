use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::auth::entities::{Session, User};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{PasswordHasher, SessionRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
  pub fn with_users(users: Vec<User>) -> Self {
    Self {
      users: Mutex::new(users),
    }
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email)
        .cloned(),
    )
  }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: Mutex<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    self
      .sessions
      .lock()
      .unwrap()
      .insert(session.id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    Ok(
      self
        .sessions
        .lock()
        .unwrap()
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    self.sessions.lock().unwrap().remove(&session_id);
    Ok(())
  }
}

/// Stores passwords verbatim; tests only
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
  async fn hash(&self, password: &str) -> Result<String, AuthError> {
    Ok(password.to_string())
  }

  async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
    Ok(password == password_hash)
  }
}
