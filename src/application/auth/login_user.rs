use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{AuthError, AuthService};

#[derive(Debug, Deserialize)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
  pub remember_me: bool,
}

#[derive(Debug)]
pub struct LoginUserResponse {
  pub user_id: Uuid,
  pub session_token: String,
  pub remember_me: bool,
}

pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let (user, token) = self
      .auth_service
      .login(&command.email, &command.password, command.remember_me)
      .await?;

    Ok(LoginUserResponse {
      user_id: user.id,
      session_token: token.into_inner(),
      remember_me: command.remember_me,
    })
  }
}
