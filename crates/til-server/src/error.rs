//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing or invalid API key")]
  Unauthorized,

  #[error("argon2 error: {0}")]
  Hash(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": self.to_string() })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Bearer realm=\"til\""),
        );
        res
      }
      Error::Hash(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": self.to_string() })),
      )
        .into_response(),
    }
  }
}
