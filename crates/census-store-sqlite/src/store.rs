//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::{fmt, path::Path, rc::Rc};

use census_core::{Filter, Person, PersonFields, PersonStore};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_birthday, encode_sex},
  query::{Bound, id_array, where_clause},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite connection.
///
/// Cloning is cheap: the inner connection is reference-counted, and every
/// clone talks to the same database.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SqliteStore").finish_non_exhaustive()
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// SQLite defers reading the file until the first statement, so a path
  /// that is not a database fails here as [`Error::Connection`] too.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let database = path.display().to_string();
    let conn = match tokio_rusqlite::Connection::open(path).await {
      Ok(conn) => conn,
      Err(source) => return Err(Error::Connection { database, source }),
    };
    let store = Self { conn };
    if let Err(source) = store.init_schema().await {
      return Err(Error::Connection { database, source });
    }
    tracing::info!(database = %database, "opened person store");
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let connection_error = |source: tokio_rusqlite::Error| Error::Connection {
      database: ":memory:".to_owned(),
      source,
    };
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(connection_error)?;
    let store = Self { conn };
    store.init_schema().await.map_err(connection_error)?;
    Ok(store)
  }

  /// Register the `rarray` table-valued function and create the schema.
  async fn init_schema(&self) -> tokio_rusqlite::Result<()> {
    self
      .conn
      .call(|conn| {
        rusqlite::vtab::array::load_module(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  // ── Single rows ───────────────────────────────────────────────────────────

  async fn find_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM person WHERE id = ?1"),
            rusqlite::params![id],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn insert_person(&self, fields: PersonFields) -> Result<i64> {
    let PersonFields { name, surname, birthday, sex, birth_city } = fields;
    let birthday_str = encode_birthday(birthday);
    let sex_flag     = encode_sex(sex);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO person (name, surname, birthday, sex, birth_city)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![name, surname, birthday_str, sex_flag, birth_city],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "inserted person");
    Ok(id)
  }

  async fn update_person(&self, id: i64, fields: PersonFields) -> Result<bool> {
    let PersonFields { name, surname, birthday, sex, birth_city } = fields;
    let birthday_str = encode_birthday(birthday);
    let sex_flag     = encode_sex(sex);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE person
           SET name = ?2, surname = ?3, birthday = ?4, sex = ?5, birth_city = ?6
           WHERE id = ?1",
          rusqlite::params![id, name, surname, birthday_str, sex_flag, birth_city],
        )?)
      })
      .await?;

    tracing::debug!(id, changed, "updated person");
    Ok(changed > 0)
  }

  async fn remove_person(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM person WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    tracing::debug!(id, removed, "removed person");
    Ok(removed > 0)
  }

  // ── Bulk ──────────────────────────────────────────────────────────────────

  async fn person_ids(&self, filters: &[Filter]) -> Result<Vec<i64>> {
    let Bound { sql: where_sql, params } = where_clause(filters);
    let sql = format!("SELECT id FROM person {where_sql} ORDER BY id");

    let ids: Vec<i64> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let ids = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
      })
      .await?;

    tracing::debug!(filters = filters.len(), matched = ids.len(), "queried person ids");
    Ok(ids)
  }

  async fn persons_by_ids(&self, ids: &[i64]) -> Result<Vec<Person>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let Bound { sql: array, params } = id_array(ids);
    let sql =
      format!("SELECT {PERSON_COLUMNS} FROM person WHERE id IN {array} ORDER BY id");

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![Rc::new(params)], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn remove_persons(&self, ids: &[i64]) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }

    let Bound { sql: array, params } = id_array(ids);
    let sql = format!("DELETE FROM person WHERE id IN {array}");

    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![Rc::new(params)])?))
      .await?;

    tracing::debug!(requested = ids.len(), removed, "removed persons");
    Ok(removed)
  }
}
