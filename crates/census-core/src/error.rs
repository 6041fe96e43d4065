//! Error types for `census-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A name or surname was empty or contained non-alphabetic characters.
  #[error("invalid {field}: {value:?} must be non-empty and alphabetic")]
  Validation { field: &'static str, value: String },

  #[error("person not found: {0}")]
  PersonNotFound(i64),

  #[error("invalid sex value {0}; expected 0 (woman) or 1 (man)")]
  InvalidSex(i64),

  #[error("invalid birthday: {0:?}")]
  InvalidBirthday(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
