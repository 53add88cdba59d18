//! Error type for `stride-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] stride_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored row names an extent this build does not know.
  #[error("unknown extent kind: {0:?}")]
  UnknownExtent(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
