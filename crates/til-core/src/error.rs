//! Error types for `til-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown vote column: {0:?}")]
  UnknownVoteColumn(String),

  #[error("invalid fact: {0}")]
  Invalid(#[from] ValidationError),
}

/// Why a draft or submitted fact was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("text is empty")]
  EmptyText,

  #[error("text is {len} characters long; the limit is {max}", max = crate::validate::MAX_TEXT_LEN)]
  TextTooLong { len: usize },

  #[error("text contains a control character at position {position}")]
  ControlCharacter { position: usize },

  #[error("source is not an http(s) URL: {0:?}")]
  InvalidSource(String),

  #[error("no category chosen")]
  MissingCategory,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
