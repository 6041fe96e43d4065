//! Error type for `census-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] census_core::Error),

  /// Connection parameters are missing or malformed.
  #[error("configuration error: {0}")]
  Configuration(String),

  /// The database could not be opened.
  #[error("cannot connect to database {database:?}: {source}")]
  Connection {
    database: String,
    #[source]
    source:   tokio_rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
