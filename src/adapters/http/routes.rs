use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::application::auth::{LoginUserUseCase, LogoutUserUseCase};
use crate::application::customer::{
  CreateCustomerUseCase, DeleteCustomerUseCase, GetCustomerDetailsUseCase, ListCustomersUseCase,
  UpdateCustomerUseCase,
};
use crate::domain::auth::services::AuthService;

use super::handlers::{customers_web, pages, web_auth};
use super::middleware::WebAuthMiddleware;
use super::templates::TemplateEngine;

/// Everything the web UI routes need, bundled so `main` hands over one value.
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub auth_service: Arc<AuthService>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub list_customers_use_case: Arc<ListCustomersUseCase>,
  pub get_details_use_case: Arc<GetCustomerDetailsUseCase>,
  pub create_customer_use_case: Arc<CreateCustomerUseCase>,
  pub update_customer_use_case: Arc<UpdateCustomerUseCase>,
  pub delete_customer_use_case: Arc<DeleteCustomerUseCase>,
}

/// Configure web UI routes
///
/// # Routes
///
/// - GET / - Redirect to the customer list
/// - GET /login - Login form
/// - POST /auth/login - Login submission
/// - POST /auth/logout - Logout
/// - GET /customers - Customer list (authenticated)
/// - GET /customers/detail?id=N - Customer detail with invoices
/// - POST /customers/create - Create a customer
/// - POST /customers/{id}/edit - Update a customer
/// - GET /customers/delete?id=N - Delete a customer
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  cfg.app_data(web::Data::new(deps.templates.clone()));

  // Public routes (no authentication required)
  cfg
    .route(
      "/",
      web::get().to(|| async {
        HttpResponse::Found()
          .insert_header(("Location", "/customers"))
          .finish()
      }),
    )
    .route("/login", web::get().to(pages::login_page));

  // Auth form submission routes
  cfg.service(
    web::scope("/auth")
      .app_data(web::Data::new(deps.login_use_case))
      .app_data(web::Data::new(deps.logout_use_case))
      .route("/login", web::post().to(web_auth::login_submit))
      .route("/logout", web::post().to(web_auth::logout)),
  );

  // Customer web UI routes (require authentication)
  cfg.service(
    web::scope("/customers")
      .wrap(WebAuthMiddleware::new(deps.auth_service))
      .app_data(web::Data::new(deps.templates))
      .app_data(web::Data::new(deps.list_customers_use_case))
      .app_data(web::Data::new(deps.get_details_use_case))
      .app_data(web::Data::new(deps.create_customer_use_case))
      .app_data(web::Data::new(deps.update_customer_use_case))
      .app_data(web::Data::new(deps.delete_customer_use_case))
      .route("", web::get().to(customers_web::customers_page))
      .route("/detail", web::get().to(customers_web::customer_detail_page))
      .route(
        "/create",
        web::post().to(customers_web::create_customer_submit),
      )
      .route(
        "/delete",
        web::get().to(customers_web::delete_customer),
      )
      .route(
        "/{id}/edit",
        web::post().to(customers_web::update_customer_submit),
      ),
  );
}
