use actix_web::{HttpRequest, HttpResponse, cookie::Cookie, cookie::SameSite, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, LogoutUserCommand, LogoutUserUseCase,
};

#[derive(Debug, Deserialize)]
pub struct LoginFormData {
  email: String,
  password: String,
  remember_me: Option<String>, // HTML checkbox: "on" or absent
}

/// Handle login form submission
pub async fn login_submit(
  form: web::Form<LoginFormData>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, actix_web::Error> {
  let remember_me = form.remember_me.is_some();

  let command = LoginUserCommand {
    email: form.email.clone(),
    password: form.password.clone(),
    remember_me,
  };

  match use_case.execute(command).await {
    Ok(response) => {
      let max_age = if response.remember_me {
        actix_web::cookie::time::Duration::days(30)
      } else {
        actix_web::cookie::time::Duration::hours(1)
      };

      let cookie = Cookie::build("session_token", response.session_token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish();

      Ok(
        HttpResponse::Found()
          .cookie(cookie)
          .insert_header(("Location", "/customers"))
          .finish(),
      )
    }
    Err(e) => {
      tracing::warn!("Login rejected: {}", e);
      Ok(
        HttpResponse::Found()
          .insert_header(("Location", "/login?error=1"))
          .finish(),
      )
    }
  }
}

/// Handle logout: drop the session server-side and clear the cookie
pub async fn logout(
  req: HttpRequest,
  use_case: web::Data<Arc<LogoutUserUseCase>>,
) -> Result<HttpResponse, actix_web::Error> {
  if let Some(cookie) = req.cookie("session_token") {
    let command = LogoutUserCommand {
      session_token: cookie.value().to_string(),
    };
    if let Err(e) = use_case.execute(command).await {
      tracing::warn!("Logout cleanup failed: {}", e);
    }
  }

  let cookie = Cookie::build("session_token", "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Strict)
    .max_age(actix_web::cookie::time::Duration::seconds(0))
    .finish();

  Ok(
    HttpResponse::Found()
      .cookie(cookie)
      .insert_header(("Location", "/login"))
      .finish(),
  )
}
