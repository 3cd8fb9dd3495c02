use actix_files as fs;
use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerdesk::{
  adapters::http::{TemplateEngine, WebRouteDependencies, configure_web_routes},
  application::auth::{LoginUserUseCase, LogoutUserUseCase},
  application::customer::{
    CreateCustomerUseCase, DeleteCustomerUseCase, GetCustomerDetailsUseCase, ListCustomersUseCase,
    UpdateCustomerUseCase,
  },
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::customer::CustomerService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresAccessPolicy, PostgresCustomerRepository, PostgresInvoiceRepository,
      PostgresSessionRepository, PostgresUserRepository,
    },
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ledgerdesk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting LedgerDesk application");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let customer_repo = Arc::new(PostgresCustomerRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let access_policy = Arc::new(PostgresAccessPolicy::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));

  // Initialize domain services
  let auth_config = AuthServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds as i64,
    remember_me_ttl_seconds: config.security.remember_me_ttl_seconds as i64,
  };

  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_repo,
    password_hasher,
    auth_config,
  ));

  let customer_service = Arc::new(CustomerService::new(
    customer_repo,
    invoice_repo,
    access_policy,
  ));

  // Initialize use cases
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let list_customers_use_case = Arc::new(ListCustomersUseCase::new(customer_service.clone()));
  let get_details_use_case = Arc::new(GetCustomerDetailsUseCase::new(customer_service.clone()));
  let create_customer_use_case = Arc::new(CreateCustomerUseCase::new(customer_service.clone()));
  let update_customer_use_case = Arc::new(UpdateCustomerUseCase::new(customer_service.clone()));
  let delete_customer_use_case = Arc::new(DeleteCustomerUseCase::new(customer_service));

  // Initialize template engine
  let templates = TemplateEngine::new().expect("Failed to initialize template engine");
  tracing::info!("Template engine initialized");

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add logging middleware
      .wrap(Logger::default())
      // Configure web UI routes
      .configure(|cfg| {
        configure_web_routes(
          cfg,
          WebRouteDependencies {
            templates: templates.clone(),
            auth_service: auth_service.clone(),
            login_use_case: login_use_case.clone(),
            logout_use_case: logout_use_case.clone(),
            list_customers_use_case: list_customers_use_case.clone(),
            get_details_use_case: get_details_use_case.clone(),
            create_customer_use_case: create_customer_use_case.clone(),
            update_customer_use_case: update_customer_use_case.clone(),
            delete_customer_use_case: delete_customer_use_case.clone(),
          },
        )
      })
      // Serve static assets
      .service(fs::Files::new("/static", "./static"))
      // Health check endpoint
      .route(
        "/health",
        web::get().to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
      )
  })
  .bind((server_host, server_port))?
  .run()
  .await
}
