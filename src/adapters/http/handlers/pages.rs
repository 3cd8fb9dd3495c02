use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::adapters::http::{errors::ApiError, templates::TemplateEngine};

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
  pub error: Option<String>,
}

// GET /login
pub async fn login_page(
  query: web::Query<LoginPageQuery>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let mut context = tera::Context::new();
  if query.error.is_some() {
    context.insert("error", "Invalid email or password");
  }

  let html = templates
    .render("pages/login.html.tera", &context)
    .map_err(|e| ApiError::Internal(format!("Template error: {}", e)))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
