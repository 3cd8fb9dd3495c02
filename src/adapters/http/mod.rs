pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

// Re-export commonly used types
pub use errors::ApiError;
pub use middleware::WebAuthMiddleware;
pub use routes::{WebRouteDependencies, configure_web_routes};
pub use templates::TemplateEngine;
