//! [`PersonRecord`]: one `person` row held in memory and kept in step with
//! storage through explicit calls.

use chrono::NaiveDate;

use crate::{
  Error,
  person::{self, Person, PersonFields, PersonView, Sex},
  store::PersonStore,
};

/// An in-memory person bound to the store it was loaded from or will be
/// saved to.
///
/// Setters only touch memory and do not validate; [`PersonRecord::save`]
/// validates before every write, so an invalid record never reaches storage.
#[derive(Debug, Clone)]
pub struct PersonRecord<S> {
  store:  S,
  id:     Option<i64>,
  fields: PersonFields,
}

impl<S: PersonStore> PersonRecord<S> {
  // ── Construction ────────────────────────────────────────────────────────

  /// Load row `id`. Fails with [`Error::PersonNotFound`] if it does not exist.
  pub async fn load(store: S, id: i64) -> Result<Self, S::Error> {
    let person = store
      .find_person(id)
      .await?
      .ok_or(Error::PersonNotFound(id))?;
    Ok(Self::hydrate(store, person))
  }

  /// Wrap a row that has already been fetched.
  pub fn hydrate(store: S, person: Person) -> Self {
    Self { store, id: Some(person.id), fields: person.fields }
  }

  /// Validate `fields` and insert them as a new row straight away.
  pub async fn create(store: S, fields: PersonFields) -> Result<Self, S::Error> {
    fields.validate()?;
    let mut record = Self { store, id: None, fields };
    record.save().await?;
    Ok(record)
  }

  /// Validate `fields` and hold them under `id` without writing anything.
  /// Nothing reaches storage until [`PersonRecord::save`].
  pub fn with_id(store: S, id: i64, fields: PersonFields) -> Result<Self, S::Error> {
    fields.validate()?;
    Ok(Self { store, id: Some(id), fields })
  }

  /// [`PersonRecord::create`] when `id` is `None`, otherwise
  /// [`PersonRecord::with_id`].
  pub async fn from_fields(
    store: S,
    fields: PersonFields,
    id: Option<i64>,
  ) -> Result<Self, S::Error> {
    match id {
      Some(id) => Self::with_id(store, id, fields),
      None => Self::create(store, fields).await,
    }
  }

  // ── Persistence ─────────────────────────────────────────────────────────

  /// Write the record. Updates in place when the identifier is set and its
  /// row still exists; otherwise inserts and adopts the generated identifier.
  ///
  /// Existence is decided by the update itself matching a row, so a row
  /// deleted since the record was loaded is re-inserted rather than silently
  /// skipped.
  pub async fn save(&mut self) -> Result<(), S::Error> {
    self.fields.validate()?;

    if let Some(id) = self.id
      && self.store.update_person(id, self.fields.clone()).await?
    {
      return Ok(());
    }

    let id = self.store.insert_person(self.fields.clone()).await?;
    self.id = Some(id);
    Ok(())
  }

  /// Fetch row `id` from storage. Leaves `self` untouched.
  pub async fn find(&self, id: i64) -> Result<Option<Person>, S::Error> {
    self.store.find_person(id).await
  }

  /// Delete row `id`. Deleting a missing row succeeds silently.
  pub async fn remove(&self, id: i64) -> Result<(), S::Error> {
    self.store.remove_person(id).await?;
    Ok(())
  }

  /// Delete this record's own row, if it was ever persisted.
  pub async fn delete(self) -> Result<(), S::Error> {
    if let Some(id) = self.id {
      self.remove(id).await?;
    }
    Ok(())
  }
}

impl<S> PersonRecord<S> {
  // ── Presentation ────────────────────────────────────────────────────────

  pub fn format(&self) -> PersonView { self.format_on(person::today()) }

  /// [`PersonRecord::format`] with the age computed as of `today`.
  pub fn format_on(&self, today: NaiveDate) -> PersonView {
    PersonView::new(self.id, &self.fields, today)
  }

  // ── Accessors ───────────────────────────────────────────────────────────

  pub fn id(&self) -> Option<i64> { self.id }

  pub fn fields(&self) -> &PersonFields { &self.fields }

  pub fn name(&self) -> &str { &self.fields.name }

  pub fn surname(&self) -> &str { &self.fields.surname }

  pub fn birthday(&self) -> NaiveDate { self.fields.birthday }

  pub fn sex(&self) -> Sex { self.fields.sex }

  pub fn birth_city(&self) -> &str { &self.fields.birth_city }

  pub fn age(&self) -> u32 { person::age(self.fields.birthday) }

  pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
    self.fields.name = name.into();
    self
  }

  pub fn set_surname(&mut self, surname: impl Into<String>) -> &mut Self {
    self.fields.surname = surname.into();
    self
  }

  pub fn set_birthday(&mut self, birthday: NaiveDate) -> &mut Self {
    self.fields.birthday = birthday;
    self
  }

  pub fn set_sex(&mut self, sex: Sex) -> &mut Self {
    self.fields.sex = sex;
    self
  }

  pub fn set_birth_city(&mut self, birth_city: impl Into<String>) -> &mut Self {
    self.fields.birth_city = birth_city.into();
    self
  }
}
