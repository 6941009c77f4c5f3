//! Error type for `til-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] til_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A column held a value outside the domain of its Rust type.
  #[error("corrupt row {id}: {reason}")]
  CorruptRow { id: i64, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
