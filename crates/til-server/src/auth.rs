//! API-key check in the style of a hosted table endpoint.
//!
//! Clients send the key twice, as `apikey: <key>` and as
//! `Authorization: Bearer <key>`; either one is accepted. Only an argon2 PHC
//! hash of the key is kept in configuration.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use rand_core::OsRng;
use std::sync::Arc;

use crate::error::Error;

/// Credentials accepted as valid for this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`. `None` leaves
  /// the endpoint open.
  pub key_hash: Option<String>,
}

/// Hash `key` into the PHC string expected in `api_key_hash`.
pub fn hash_key(key: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(key.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::Hash(e.to_string()))
}

/// Every key the request carries, `apikey` first.
fn presented_keys(headers: &HeaderMap) -> impl Iterator<Item = &str> {
  let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
  let bearer = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "));
  apikey.into_iter().chain(bearer)
}

/// Verify the keys carried in `headers` against `config`. The request passes
/// if any presented key matches.
pub fn verify_key(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let Some(hash) = &config.key_hash else {
    return Ok(());
  };

  let parsed_hash = PasswordHash::new(hash).map_err(|_| Error::Unauthorized)?;
  let argon2 = Argon2::default();

  presented_keys(headers)
    .any(|key| argon2.verify_password(key.as_bytes(), &parsed_hash).is_ok())
    .then_some(())
    .ok_or(Error::Unauthorized)
}

/// Middleware rejecting requests without a valid key.
pub async fn require_api_key(
  State(config): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Response {
  match verify_key(req.headers(), &config) {
    Ok(()) => next.run(req).await,
    Err(e) => {
      tracing::warn!(uri = %req.uri(), "rejected request without a valid API key");
      e.into_response()
    }
  }
}
