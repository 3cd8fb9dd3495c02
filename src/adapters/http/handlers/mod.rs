pub mod customers_web;
pub mod pages;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest};

use crate::adapters::http::errors::ApiError;
use crate::domain::auth::entities::User;

/// Extract the authenticated user placed in request extensions by
/// `WebAuthMiddleware`
pub fn get_user(req: &HttpRequest) -> Result<User, ApiError> {
  let user = req.extensions().get::<User>().cloned();

  if user.is_none() {
    tracing::warn!(
      "get_user: User not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or(ApiError::Unauthorized)
}
