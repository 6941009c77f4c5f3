//! Error type for `til-store-rest`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The endpoint answered with a non-success status.
  #[error("{method} {path} → {status}: {body}")]
  Status {
    method: &'static str,
    path:   String,
    status: StatusCode,
    body:   String,
  },

  /// A write asked for the stored row but none came back.
  #[error("{0} returned no rows")]
  EmptyResponse(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
