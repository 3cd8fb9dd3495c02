use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, SessionToken};

#[derive(Debug)]
pub struct LogoutUserCommand {
  pub session_token: String,
}

pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: LogoutUserCommand) -> Result<(), AuthError> {
    let token = SessionToken::from_string(command.session_token)?;
    self.auth_service.logout(token).await
  }
}
