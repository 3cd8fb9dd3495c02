pub mod web_auth;

pub use web_auth::WebAuthMiddleware;
