//! [`PersonCollection`]: a query-derived list of person identifiers.

use crate::{filter::Filter, record::PersonRecord, store::PersonStore};

/// Identifiers matched once at construction time; never refreshed.
///
/// The list may be replaced with [`PersonCollection::set_ids`] before
/// hydrating or bulk-deleting.
#[derive(Debug, Clone)]
pub struct PersonCollection<S> {
  store: S,
  ids:   Vec<i64>,
}

impl<S: PersonStore> PersonCollection<S> {
  /// Collect the identifiers of every row matching all `filters`.
  pub async fn query(store: S, filters: &[Filter]) -> Result<Self, S::Error> {
    let ids = store.person_ids(filters).await?;
    Ok(Self { store, ids })
  }

  /// Collect the identifiers of every row in the table.
  pub async fn all(store: S) -> Result<Self, S::Error> {
    Self::query(store, &[]).await
  }

  /// Hydrate one [`PersonRecord`] per held identifier that still has a row.
  pub async fn persons(&self) -> Result<Vec<PersonRecord<S>>, S::Error> {
    if self.ids.is_empty() {
      return Ok(Vec::new());
    }

    let rows = self.store.persons_by_ids(&self.ids).await?;
    Ok(
      rows
        .into_iter()
        .map(|person| PersonRecord::hydrate(self.store.clone(), person))
        .collect(),
    )
  }

  /// Delete every held identifier's row in one statement and return how many
  /// rows went away.
  pub async fn delete_persons(&self) -> Result<usize, S::Error> {
    if self.ids.is_empty() {
      return Ok(0);
    }
    self.store.remove_persons(&self.ids).await
  }
}

impl<S> PersonCollection<S> {
  pub fn ids(&self) -> &[i64] { &self.ids }

  pub fn set_ids(&mut self, ids: Vec<i64>) -> &mut Self {
    self.ids = ids;
    self
  }

  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }
}
