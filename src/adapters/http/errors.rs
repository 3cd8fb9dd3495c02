use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::AuthError;
use crate::domain::customer::CustomerError;

/// Error type for page handlers. Failures covered by the redirect contract
/// never reach this type; it only carries what is left over (template
/// failures, storage failures on page loads, broken sessions).
#[derive(Debug)]
pub enum ApiError {
  /// Invalid user input (400 Bad Request)
  Validation(String),

  /// Missing or broken session (401)
  Unauthorized,

  /// Valid session, insufficient rights for the resource (403)
  Forbidden,

  /// Internal server error (500)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Unauthorized => write!(f, "Not authenticated"),
      ApiError::Forbidden => write!(f, "Access denied"),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      ApiError::Validation(msg) => msg.clone(),
      ApiError::Unauthorized => "Not authenticated".to_string(),
      ApiError::Forbidden => "Access denied".to_string(),
      ApiError::Internal(msg) => {
        // Detail goes to the log, not to the browser
        tracing::error!("Internal error: {}", msg);
        "An internal server error occurred".to_string()
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::html())
      .body(format!("<h1>Error</h1><p>{}</p>", message))
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials | AuthError::InvalidSession | AuthError::UserNotFound => {
        ApiError::Unauthorized
      }
      AuthError::ValueObject(e) => ApiError::Validation(e.to_string()),
      AuthError::Hash(e) => ApiError::Internal(e),
      AuthError::Database(e) => ApiError::Internal(e.to_string()),
      AuthError::Internal(e) => ApiError::Internal(e),
    }
  }
}

impl From<CustomerError> for ApiError {
  fn from(error: CustomerError) -> Self {
    match error {
      CustomerError::Validation(e) => ApiError::Validation(e.to_string()),
      CustomerError::NameAlreadyExists => {
        ApiError::Validation("Customer name already exists".to_string())
      }
      CustomerError::PermissionDenied(_) => ApiError::Forbidden,
      CustomerError::NotFound(id) => ApiError::Validation(format!("Customer {} not found", id)),
      CustomerError::HasInvoices { .. }
      | CustomerError::DeleteFailed(_)
      | CustomerError::Database(_)
      | CustomerError::Internal(_) => ApiError::Internal(error.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_customer_error_conversion() {
    let api_error: ApiError =
      CustomerError::PermissionDenied("nope".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);

    let api_error: ApiError = CustomerError::NameAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }
}
