//! Error types for `fiche-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("client id must not be empty")]
  EmptyClientId,

  #[error("unknown source type: {0:?}")]
  UnknownSourceType(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
