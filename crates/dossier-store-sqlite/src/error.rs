//! Error type for `dossier-store-sqlite`.

use dossier_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain rule rejected the operation before anything was written.
  #[error(transparent)]
  Core(#[from] dossier_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored column could not be turned back into a domain value.
  #[error("decode error: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn domain(&self) -> Option<&dossier_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      Self::Database(_) | Self::Decode(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
