use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::PasswordHasher;

/// Argon2id password hasher
///
/// Memory cost 19 MiB, 2 iterations, 1 thread.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(19456, 2, 1, Some(32))
      .map_err(|e| AuthError::Hash(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| AuthError::Hash(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
  }

  async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = Argon2PasswordHash::new(password_hash)
      .map_err(|e| AuthError::Hash(format!("Invalid password hash: {}", e)))?;

    match self.argon2.verify_password(password.as_bytes(), &parsed) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(AuthError::Hash(format!("Failed to verify password: {}", e))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_hash_and_verify_round_trip() {
    let hasher = Argon2PasswordHasher::new().unwrap();

    let hash = hasher.hash("correct horse battery staple").await.unwrap();
    assert!(hash.starts_with("$argon2id$"));

    assert!(hasher
      .verify("correct horse battery staple", &hash)
      .await
      .unwrap());
    assert!(!hasher.verify("wrong password", &hash).await.unwrap());
  }
}
