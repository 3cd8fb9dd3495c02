pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Session, User, UserRole};
pub use errors::AuthError;
pub use ports::{PasswordHasher, SessionRepository, UserRepository};
pub use services::{AuthService, AuthServiceConfig};
pub use value_objects::SessionToken;
