//! Connection configuration and the lazily-opened shared store.
//!
//! The process bootstrap builds one [`ConnectionProvider`] and passes it (or
//! the store it hands out) to whatever needs database access.

use std::path::Path;

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::{Error, Result, SqliteStore};

/// Environment variable prefix, e.g. `CENSUS_DATABASE=/var/lib/census.db`.
pub const ENV_PREFIX: &str = "CENSUS";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection parameters, deserialised from a config file and/or the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// Location of the SQLite database: a file path, or `:memory:`.
  #[serde(default, alias = "db_name")]
  pub database: String,
}

impl DatabaseConfig {
  pub fn new(database: impl Into<String>) -> Self {
    Self { database: database.into() }
  }

  /// Read configuration from `path` (format inferred from its extension),
  /// overridden by `CENSUS_*` environment variables.
  ///
  /// A `path` that is given but does not exist is a
  /// [`Error::Configuration`]: naming a file is a request to read it. Pass
  /// `None` to configure from the environment alone.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder = builder.add_source(config::File::from(path));
    }
    let settings = builder
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()
      .map_err(|e| Error::Configuration(e.to_string()))?;

    Self::from_settings(settings)
  }

  /// Deserialise and validate an already-built [`config::Config`].
  pub fn from_settings(settings: config::Config) -> Result<Self> {
    let cfg: Self = settings
      .try_deserialize()
      .map_err(|e| Error::Configuration(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
  }

  pub fn validate(&self) -> Result<()> {
    if self.database.trim().is_empty() {
      return Err(Error::Configuration("`database` is not set".to_owned()));
    }
    Ok(())
  }
}

// ─── Provider ────────────────────────────────────────────────────────────────

/// Owns at most one open [`SqliteStore`], created on first use.
///
/// Every call to [`ConnectionProvider::instance`] after the first returns a
/// clone of the same store. A failed open is not cached, so the next call
/// tries again.
#[derive(Debug)]
pub struct ConnectionProvider {
  config: DatabaseConfig,
  store:  OnceCell<SqliteStore>,
}

impl ConnectionProvider {
  /// No I/O happens until [`ConnectionProvider::instance`] is called.
  pub fn new(config: DatabaseConfig) -> Self {
    Self { config, store: OnceCell::new() }
  }

  pub fn config(&self) -> &DatabaseConfig { &self.config }

  /// The shared store, opening the connection if this is the first call.
  pub async fn instance(&self) -> Result<SqliteStore> {
    let store = self
      .store
      .get_or_try_init(|| async {
        self.config.validate()?;
        SqliteStore::open(&self.config.database).await
      })
      .await?;
    Ok(store.clone())
  }

  pub fn is_connected(&self) -> bool { self.store.initialized() }
}

#[cfg(test)]
mod tests {
  use std::{
    fs,
    sync::{Mutex, MutexGuard, OnceLock},
  };

  use config::{File, FileFormat};

  use super::*;

  fn settings(source: &str, format: FileFormat) -> config::Config {
    config::Config::builder()
      .add_source(File::from_str(source, format))
      .build()
      .unwrap()
  }

  /// Serialises tests that read or write `CENSUS_*` variables.
  fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK
      .get_or_init(|| Mutex::new(()))
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  fn clear_env() {
    // SAFETY: every test touching the process environment holds `env_lock`.
    unsafe {
      std::env::remove_var("CENSUS_DATABASE");
      std::env::remove_var("CENSUS_DB_NAME");
    }
  }

  #[test]
  fn reads_database_from_toml() {
    let cfg =
      DatabaseConfig::from_settings(settings("database = \"people.db\"", FileFormat::Toml))
        .unwrap();
    assert_eq!(cfg.database, "people.db");
  }

  #[test]
  fn accepts_db_name_key_from_ini() {
    let cfg =
      DatabaseConfig::from_settings(settings("db_name = people.db\n", FileFormat::Ini))
        .unwrap();
    assert_eq!(cfg.database, "people.db");
  }

  #[test]
  fn missing_database_is_a_configuration_error() {
    let empty = config::Config::builder().build().unwrap();
    let err = DatabaseConfig::from_settings(empty).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }

  #[test]
  fn blank_database_is_a_configuration_error() {
    let err = DatabaseConfig::new("  ").validate().unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }

  #[test]
  fn load_reads_toml_file() {
    let _guard = env_lock();
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("census.toml");
    fs::write(&path, "database = \"from-file.db\"\n").unwrap();

    let cfg = DatabaseConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(cfg.database, "from-file.db");
  }

  #[test]
  fn load_reads_ini_file_with_db_name() {
    let _guard = env_lock();
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.ini");
    fs::write(&path, "db_name = legacy.db\n").unwrap();

    let cfg = DatabaseConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(cfg.database, "legacy.db");
  }

  #[test]
  fn environment_overrides_file() {
    let _guard = env_lock();
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("census.toml");
    fs::write(&path, "database = \"from-file.db\"\n").unwrap();

    // SAFETY: guarded by `env_lock`.
    unsafe { std::env::set_var("CENSUS_DATABASE", "from-env.db") };
    let loaded = DatabaseConfig::load(Some(path.as_path()));
    let env_only = DatabaseConfig::load(None);
    clear_env();

    assert_eq!(loaded.unwrap().database, "from-env.db");
    assert_eq!(env_only.unwrap().database, "from-env.db");
  }

  #[test]
  fn load_without_any_source_is_a_configuration_error() {
    let _guard = env_lock();
    clear_env();

    let err = DatabaseConfig::load(None).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }

  #[test]
  fn load_named_missing_file_is_a_configuration_error() {
    let _guard = env_lock();
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    let err = DatabaseConfig::load(Some(absent.as_path())).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }
}
