//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `census-store-sqlite`).
//! [`PersonRecord`](crate::PersonRecord) and
//! [`PersonCollection`](crate::PersonCollection) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  filter::Filter,
  person::{Person, PersonFields},
};

/// Row-level access to the `person` table.
///
/// Handles are cloned into every record they produce, so cloning must be
/// cheap. All methods return `Send` futures.
pub trait PersonStore: Clone + Send + Sync {
  /// Backend error; must be able to carry [`crate::Error`] so the record layer
  /// can raise validation and not-found failures through it.
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  /// Fetch the row with primary key `id`. Returns `None` if absent.
  fn find_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Insert a new row and return its generated identifier.
  fn insert_person(
    &self,
    fields: PersonFields,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Overwrite every column of row `id`. Returns `false` if no row matched.
  fn update_person(
    &self,
    id: i64,
    fields: PersonFields,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete row `id`. Returns `false` if no row matched; that is not an error.
  fn remove_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Identifiers of every row matching all `filters`, in ascending order.
  fn person_ids<'a>(
    &'a self,
    filters: &'a [Filter],
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + 'a;

  /// All rows whose identifier is in `ids`, fetched with a single query.
  fn persons_by_ids<'a>(
    &'a self,
    ids: &'a [i64],
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Delete all rows whose identifier is in `ids` with a single statement.
  /// Returns the number of rows removed.
  fn remove_persons<'a>(
    &'a self,
    ids: &'a [i64],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
