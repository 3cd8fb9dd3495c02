use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::{errors::ApiError, templates::TemplateEngine};
use crate::application::customer::{
  CreateCustomerCommand, CreateCustomerUseCase, DeleteCustomerCommand, DeleteCustomerUseCase,
  GetCustomerDetailsCommand, GetCustomerDetailsUseCase, ListCustomersCommand,
  ListCustomersUseCase, UpdateCustomerCommand, UpdateCustomerUseCase,
};
use crate::domain::customer::CustomerError;

use super::get_user;

const CUSTOMER_LIST_PATH: &str = "/customers";
const CUSTOMER_DETAIL_PATH: &str = "/customers/detail";
const LOGIN_PATH: &str = "/login";

const ERROR_CANNOT_DELETE: &str = "cannot_delete";
const ERROR_DELETE_FAILED: &str = "delete_failed";

fn redirect_to(location: String) -> HttpResponse {
  HttpResponse::Found()
    .insert_header(("Location", location))
    .finish()
}

fn list_url() -> String {
  CUSTOMER_LIST_PATH.to_string()
}

fn deleted_url(name: &str) -> String {
  format!(
    "{}?deleted=1&name={}",
    CUSTOMER_LIST_PATH,
    urlencoding::encode(name)
  )
}

fn detail_url(customer_id: i64) -> String {
  format!("{}?id={}", CUSTOMER_DETAIL_PATH, customer_id)
}

fn detail_error_url(customer_id: i64, error: &str) -> String {
  format!("{}?id={}&error={}", CUSTOMER_DETAIL_PATH, customer_id, error)
}

/// The identifier arrives as an untyped query parameter. Absent, blank and
/// non-numeric values are all treated as "no identifier given".
fn parse_customer_id(raw: Option<&str>) -> Option<i64> {
  raw.and_then(|value| value.trim().parse::<i64>().ok())
}

#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
  pub deleted: Option<String>,
  pub name: Option<String>,
  pub error: Option<String>,
}

// GET /customers - List all customers for the caller's organization
pub async fn customers_page(
  req: HttpRequest,
  query: web::Query<CustomerListQuery>,
  templates: web::Data<TemplateEngine>,
  list_customers_use_case: web::Data<Arc<ListCustomersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let response = list_customers_use_case
    .execute(ListCustomersCommand { user: user.clone() })
    .await?;

  let mut context = tera::Context::new();
  context.insert("customers", &response.customers);
  context.insert("user", &user);
  if query.deleted.as_deref() == Some("1") {
    context.insert("deleted_name", query.name.as_deref().unwrap_or(""));
  }
  if let Some(error) = &query.error {
    context.insert("error", error);
  }

  let html = templates
    .render("pages/customers.html.tera", &context)
    .map_err(|e| ApiError::Internal(format!("Template error: {}", e)))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetailQuery {
  pub id: Option<String>,
  pub error: Option<String>,
}

// GET /customers/detail?id=N - Customer detail with its invoices
pub async fn customer_detail_page(
  req: HttpRequest,
  query: web::Query<CustomerDetailQuery>,
  templates: web::Data<TemplateEngine>,
  get_details_use_case: web::Data<Arc<GetCustomerDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let Some(customer_id) = parse_customer_id(query.id.as_deref()) else {
    return Ok(redirect_to(list_url()));
  };

  match get_details_use_case
    .execute(GetCustomerDetailsCommand {
      user: user.clone(),
      customer_id,
    })
    .await
  {
    Ok(response) => {
      let mut context = tera::Context::new();
      context.insert("user", &user);
      context.insert("customer", &response.customer);
      context.insert("invoices", &response.invoices);
      context.insert("invoice_count", &response.invoice_count);
      if let Some(error) = &query.error {
        context.insert("error", error);
      }

      let html = templates
        .render("pages/customer_detail.html.tera", &context)
        .map_err(|e| ApiError::Internal(format!("Template error: {}", e)))?;

      Ok(HttpResponse::Ok().content_type("text/html").body(html))
    }
    Err(CustomerError::NotFound(_)) => Ok(redirect_to(list_url())),
    Err(CustomerError::PermissionDenied(_)) => Ok(redirect_to(LOGIN_PATH.to_string())),
    Err(e) => Err(e.into()),
  }
}

#[derive(Debug, Deserialize)]
pub struct CustomerForm {
  name: String,
  email: Option<String>,
}

// POST /customers/create - Create a new customer
pub async fn create_customer_submit(
  req: HttpRequest,
  form: web::Form<CustomerForm>,
  create_customer_use_case: web::Data<Arc<CreateCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  match create_customer_use_case
    .execute(CreateCustomerCommand {
      user,
      name: form.name.clone(),
      email: form.email.clone(),
    })
    .await
  {
    Ok(customer) => Ok(redirect_to(detail_url(customer.id))),
    Err(CustomerError::Validation(_)) | Err(CustomerError::NameAlreadyExists) => Ok(redirect_to(
      format!("{}?error=create_failed", CUSTOMER_LIST_PATH),
    )),
    Err(e) => Err(e.into()),
  }
}

// POST /customers/{id}/edit - Update a customer
pub async fn update_customer_submit(
  req: HttpRequest,
  path: web::Path<i64>,
  form: web::Form<CustomerForm>,
  update_customer_use_case: web::Data<Arc<UpdateCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let customer_id = path.into_inner();

  match update_customer_use_case
    .execute(UpdateCustomerCommand {
      user,
      customer_id,
      name: form.name.clone(),
      email: form.email.clone(),
    })
    .await
  {
    Ok(_) => Ok(redirect_to(detail_url(customer_id))),
    Err(CustomerError::NotFound(_)) => Ok(redirect_to(list_url())),
    Err(CustomerError::PermissionDenied(_)) => Ok(redirect_to(LOGIN_PATH.to_string())),
    Err(CustomerError::Validation(_)) | Err(CustomerError::NameAlreadyExists) => Ok(redirect_to(
      detail_error_url(customer_id, "update_failed"),
    )),
    Err(e) => Err(e.into()),
  }
}

#[derive(Debug, Deserialize)]
pub struct DeleteCustomerQuery {
  pub id: Option<String>,
}

// GET /customers/delete?id=N - Delete a customer record
//
// Every outcome is a redirect; the handler itself never renders a body:
//   - no usable id          -> list view, untouched stores
//   - not found             -> list view, no error indicator
//   - invoices attached     -> detail view, error=cannot_delete
//   - delete did not happen -> detail view, error=delete_failed
//   - unauthorized          -> login
//   - success               -> list view with deleted=1 and the escaped name
pub async fn delete_customer(
  req: HttpRequest,
  query: web::Query<DeleteCustomerQuery>,
  delete_customer_use_case: web::Data<Arc<DeleteCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let Some(customer_id) = parse_customer_id(query.id.as_deref()) else {
    return Ok(redirect_to(list_url()));
  };

  match delete_customer_use_case
    .execute(DeleteCustomerCommand { user, customer_id })
    .await
  {
    Ok(response) => Ok(redirect_to(deleted_url(&response.name))),
    Err(CustomerError::NotFound(_)) => Ok(redirect_to(list_url())),
    Err(CustomerError::HasInvoices { .. }) => Ok(redirect_to(detail_error_url(
      customer_id,
      ERROR_CANNOT_DELETE,
    ))),
    Err(CustomerError::DeleteFailed(reason)) => {
      tracing::error!(customer_id, reason, "Customer delete failed");
      Ok(redirect_to(detail_error_url(
        customer_id,
        ERROR_DELETE_FAILED,
      )))
    }
    Err(CustomerError::PermissionDenied(_)) => Ok(redirect_to(LOGIN_PATH.to_string())),
    Err(e) => Err(e.into()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::{User, UserRole};
  use crate::domain::customer::{CustomerName, CustomerRepository, CustomerService};
  use crate::infrastructure::persistence::memory::{
    InMemoryAccessPolicy, InMemoryCustomerRepository, InMemoryInvoiceRepository,
  };
  use actix_web::HttpMessage;
  use actix_web::http::{StatusCode, header::LOCATION};
  use actix_web::test::TestRequest;
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[test]
  fn test_parse_customer_id() {
    assert_eq!(parse_customer_id(None), None);
    assert_eq!(parse_customer_id(Some("")), None);
    assert_eq!(parse_customer_id(Some("   ")), None);
    assert_eq!(parse_customer_id(Some("abc")), None);
    assert_eq!(parse_customer_id(Some("42")), Some(42));
    assert_eq!(parse_customer_id(Some(" 42 ")), Some(42));
  }

  #[test]
  fn test_deleted_url_escapes_name() {
    assert_eq!(deleted_url("Acme Co"), "/customers?deleted=1&name=Acme%20Co");
    assert_eq!(
      deleted_url("Müller & Sons"),
      "/customers?deleted=1&name=M%C3%BCller%20%26%20Sons"
    );
  }

  #[test]
  fn test_detail_error_url() {
    assert_eq!(
      detail_error_url(7, ERROR_CANNOT_DELETE),
      "/customers/detail?id=7&error=cannot_delete"
    );
    assert_eq!(
      detail_error_url(7, ERROR_DELETE_FAILED),
      "/customers/detail?id=7&error=delete_failed"
    );
  }

  struct Fixture {
    customers: Arc<InMemoryCustomerRepository>,
    invoices: Arc<InMemoryInvoiceRepository>,
    delete_use_case: Arc<DeleteCustomerUseCase>,
    org_id: Uuid,
  }

  fn fixture() -> Fixture {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    customers.link_invoices(invoices.clone());

    let policy = Arc::new(InMemoryAccessPolicy::new(customers.clone()));
    let service = Arc::new(CustomerService::new(
      customers.clone(),
      invoices.clone(),
      policy,
    ));

    Fixture {
      customers,
      invoices,
      delete_use_case: Arc::new(DeleteCustomerUseCase::new(service)),
      org_id: Uuid::new_v4(),
    }
  }

  fn admin(org_id: Uuid) -> User {
    User::new(
      org_id,
      "admin@example.com".to_string(),
      "hash".to_string(),
      "Admin".to_string(),
      UserRole::Admin,
    )
  }

  fn authed_request(user: User) -> HttpRequest {
    let req = TestRequest::default().to_http_request();
    req.extensions_mut().insert(user);
    req
  }

  async fn run_delete(fixture: &Fixture, user: User, id: Option<&str>) -> HttpResponse {
    let req = authed_request(user);
    let query = web::Query(DeleteCustomerQuery {
      id: id.map(str::to_string),
    });
    delete_customer(req, query, web::Data::new(fixture.delete_use_case.clone()))
      .await
      .unwrap()
  }

  fn location(resp: &HttpResponse) -> &str {
    resp.headers().get(LOCATION).unwrap().to_str().unwrap()
  }

  #[tokio::test]
  async fn test_missing_id_redirects_to_list_without_store_calls() {
    let fixture = fixture();
    let user = admin(fixture.org_id);

    for raw_id in [None, Some(""), Some("   ")] {
      let resp = run_delete(&fixture, user.clone(), raw_id).await;
      assert_eq!(resp.status(), StatusCode::FOUND);
      assert_eq!(location(&resp), "/customers");
    }

    assert_eq!(fixture.customers.call_count(), 0);
    assert_eq!(fixture.invoices.count_calls(), 0);
  }

  #[tokio::test]
  async fn test_delete_without_invoices_redirects_with_escaped_name() {
    let fixture = fixture();
    let user = admin(fixture.org_id);

    let customer = fixture
      .customers
      .create(fixture.org_id, CustomerName::new("Acme Co").unwrap(), None)
      .await
      .unwrap();

    let resp = run_delete(&fixture, user, Some(&customer.id.to_string())).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/customers?deleted=1&name=Acme%20Co");
    assert!(fixture
      .customers
      .find_by_id(customer.id)
      .await
      .unwrap()
      .is_none());
  }

  #[tokio::test]
  async fn test_delete_with_invoices_redirects_to_detail_blocked() {
    let fixture = fixture();
    let user = admin(fixture.org_id);

    let customer = fixture
      .customers
      .create(fixture.org_id, CustomerName::new("Acme Co").unwrap(), None)
      .await
      .unwrap();
    for n in 1..=3u32 {
      fixture.invoices.insert(
        customer.id,
        format!("INV-{:04}", n),
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap(),
        dec!(100.00),
      );
    }

    let resp = run_delete(&fixture, user, Some(&customer.id.to_string())).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
      location(&resp),
      format!("/customers/detail?id={}&error=cannot_delete", customer.id)
    );
    assert!(fixture
      .customers
      .find_by_id(customer.id)
      .await
      .unwrap()
      .is_some());
  }

  #[tokio::test]
  async fn test_delete_nonexistent_customer_redirects_to_list_idempotently() {
    let fixture = fixture();
    let user = admin(fixture.org_id);

    for _ in 0..2 {
      let resp = run_delete(&fixture, user.clone(), Some("404")).await;
      assert_eq!(resp.status(), StatusCode::FOUND);
      assert_eq!(location(&resp), "/customers");
    }
  }

  #[tokio::test]
  async fn test_delete_by_unauthorized_user_redirects_to_login() {
    let fixture = fixture();
    let staff = User::new(
      fixture.org_id,
      "staff@example.com".to_string(),
      "hash".to_string(),
      "Staff".to_string(),
      UserRole::Staff,
    );

    let customer = fixture
      .customers
      .create(fixture.org_id, CustomerName::new("Acme Co").unwrap(), None)
      .await
      .unwrap();
    let calls_before = fixture.customers.call_count();

    let resp = run_delete(&fixture, staff, Some(&customer.id.to_string())).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login");
    // Terminated before the invoice count or delete step
    assert_eq!(fixture.invoices.count_calls(), 0);
    assert_eq!(fixture.customers.call_count(), calls_before);
    assert!(fixture
      .customers
      .find_by_id(customer.id)
      .await
      .unwrap()
      .is_some());
  }

  #[tokio::test]
  async fn test_delete_race_loss_redirects_to_detail_failed() {
    let fixture = fixture();
    let user = admin(fixture.org_id);

    let customer = fixture
      .customers
      .create(fixture.org_id, CustomerName::new("Acme Co").unwrap(), None)
      .await
      .unwrap();
    fixture.customers.refuse_deletes();

    let resp = run_delete(&fixture, user, Some(&customer.id.to_string())).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
      location(&resp),
      format!("/customers/detail?id={}&error=delete_failed", customer.id)
    );
  }
}
