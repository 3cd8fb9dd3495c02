use chrono::Duration;
use std::sync::Arc;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::ports::{PasswordHasher, SessionRepository, UserRepository};
use super::value_objects::SessionToken;

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
}

pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      config,
    }
  }

  /// Verifies credentials and opens a session. Returns the user together
  /// with the raw token destined for the session cookie.
  pub async fn login(
    &self,
    email: &str,
    password: &str,
    remember_me: bool,
  ) -> Result<(User, SessionToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let is_valid = self
      .password_hasher
      .verify(password, &user.password_hash)
      .await?;

    if !is_valid {
      tracing::warn!(email, "Failed login attempt");
      return Err(AuthError::InvalidCredentials);
    }

    let token = SessionToken::generate();
    let ttl = if remember_me {
      Duration::seconds(self.config.remember_me_ttl_seconds)
    } else {
      Duration::seconds(self.config.session_ttl_seconds)
    };

    let session = Session::with_duration(user.id, token.hash(), ttl);
    self.session_repo.create(session).await?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok((user, token))
  }

  /// Resolves a session cookie back to its user, dropping expired sessions
  /// along the way.
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(&token.hash())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    if let Some(session) = self.session_repo.find_by_token_hash(&token.hash()).await? {
      self.session_repo.delete(session.id).await?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::UserRole;
  use crate::infrastructure::persistence::memory::{
    InMemorySessionRepository, InMemoryUserRepository, PlainTextHasher,
  };
  use uuid::Uuid;

  fn service() -> (AuthService, User) {
    let user = User::new(
      Uuid::new_v4(),
      "admin@example.com".to_string(),
      "secret".to_string(),
      "Admin".to_string(),
      UserRole::Admin,
    );

    let users = Arc::new(InMemoryUserRepository::with_users(vec![user.clone()]));
    let sessions = Arc::new(InMemorySessionRepository::new());
    let config = AuthServiceConfig {
      session_ttl_seconds: 3600,
      remember_me_ttl_seconds: 30 * 24 * 3600,
    };

    (
      AuthService::new(users, sessions, Arc::new(PlainTextHasher), config),
      user,
    )
  }

  #[tokio::test]
  async fn test_login_and_validate_session() {
    let (service, user) = service();

    let (logged_in, token) = service
      .login("admin@example.com", "secret", false)
      .await
      .unwrap();
    assert_eq!(logged_in.id, user.id);

    let validated = service.validate_session(token).await.unwrap();
    assert_eq!(validated.id, user.id);
  }

  #[tokio::test]
  async fn test_login_rejects_wrong_password() {
    let (service, _) = service();

    let err = service
      .login("admin@example.com", "wrong", false)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
  }

  #[tokio::test]
  async fn test_logout_invalidates_session() {
    let (service, _) = service();

    let (_, token) = service
      .login("admin@example.com", "secret", false)
      .await
      .unwrap();
    let token_copy = SessionToken::from_string(token.as_str()).unwrap();

    service.logout(token).await.unwrap();

    let err = service.validate_session(token_copy).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidSession));
  }
}
