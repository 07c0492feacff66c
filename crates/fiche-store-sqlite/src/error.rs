//! Error type for `fiche-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] fiche_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The database still holds the legacy flat schema; writes are refused
  /// until `migrate_legacy` has run.
  #[error("legacy schema detected: run the migration before writing")]
  LegacySchema,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
