//! Person types: the stored row, its editable fields, and the presentation
//! view derived from them.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::{Error, Result};

// ─── Sex ─────────────────────────────────────────────────────────────────────

/// Stored as a small integer flag: 0 for [`Sex::Woman`], 1 for [`Sex::Man`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
  Woman,
  Man,
}

impl Sex {
  pub fn as_str(self) -> &'static str {
    match self {
      Sex::Woman => "woman",
      Sex::Man => "man",
    }
  }

  pub fn flag(self) -> i64 {
    match self {
      Sex::Woman => 0,
      Sex::Man => 1,
    }
  }
}

impl TryFrom<i64> for Sex {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> {
    match value {
      0 => Ok(Sex::Woman),
      1 => Ok(Sex::Man),
      other => Err(Error::InvalidSex(other)),
    }
  }
}

impl fmt::Display for Sex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The editable columns of a `person` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFields {
  pub name:       String,
  pub surname:    String,
  pub birthday:   NaiveDate,
  pub sex:        Sex,
  pub birth_city: String,
}

impl PersonFields {
  pub fn new(
    name: impl Into<String>,
    surname: impl Into<String>,
    birthday: NaiveDate,
    sex: Sex,
    birth_city: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      surname: surname.into(),
      birthday,
      sex,
      birth_city: birth_city.into(),
    }
  }

  /// Check that name and surname are fit to be persisted.
  pub fn validate(&self) -> Result<()> {
    validate_name("name", &self.name)?;
    validate_name("surname", &self.surname)
  }
}

/// A name passes when it is non-empty and every character is alphabetic.
pub fn validate_name(field: &'static str, value: &str) -> Result<()> {
  if !value.is_empty() && value.chars().all(char::is_alphabetic) {
    Ok(())
  } else {
    Err(Error::Validation { field, value: value.to_owned() })
  }
}

// ─── Stored row ──────────────────────────────────────────────────────────────

/// A row as it exists in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
  pub id:     i64,
  pub fields: PersonFields,
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Parse a stored birthday. Accepts `YYYY-MM-DD`, or a `YYYY-MM-DD HH:MM:SS`
/// datetime whose date part is kept.
pub fn parse_birthday(text: &str) -> Result<NaiveDate> {
  let text = text.trim();
  NaiveDate::parse_from_str(text, "%Y-%m-%d")
    .or_else(|_| {
      NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
    })
    .map_err(|_| Error::InvalidBirthday(text.to_owned()))
}

/// Whole years between `birthday` and `today`, truncated.
///
/// A birthday later than `today` yields 0.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> u32 {
  today.years_since(birthday).unwrap_or(0)
}

/// [`age_on`] evaluated against the local calendar date.
pub fn age(birthday: NaiveDate) -> u32 { age_on(birthday, today()) }

pub(crate) fn today() -> NaiveDate { Local::now().date_naive() }

// ─── View ────────────────────────────────────────────────────────────────────

/// Read-only presentation snapshot of a person, with derived age and sex text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonView {
  pub id:         Option<i64>,
  pub name:       String,
  pub surname:    String,
  pub birthday:   NaiveDate,
  pub age:        u32,
  pub sex:        &'static str,
  pub birth_city: String,
}

impl PersonView {
  pub fn new(id: Option<i64>, fields: &PersonFields, today: NaiveDate) -> Self {
    Self {
      id,
      name: fields.name.clone(),
      surname: fields.surname.clone(),
      birthday: fields.birthday,
      age: age_on(fields.birthday, today),
      sex: fields.sex.as_str(),
      birth_city: fields.birth_city.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn age_counts_whole_years() {
    assert_eq!(age_on(date(2000, 1, 1), date(2024, 6, 15)), 24);
  }

  #[test]
  fn age_truncates_partial_years() {
    let birthday = date(2000, 6, 16);
    assert_eq!(age_on(birthday, date(2024, 6, 15)), 23);
    assert_eq!(age_on(birthday, date(2024, 6, 16)), 24);
  }

  #[test]
  fn age_of_leap_day_birthday() {
    let birthday = date(2000, 2, 29);
    assert_eq!(age_on(birthday, date(2001, 2, 28)), 0);
    assert_eq!(age_on(birthday, date(2001, 3, 1)), 1);
  }

  #[test]
  fn future_birthday_is_zero() {
    assert_eq!(age_on(date(2030, 1, 1), date(2024, 6, 15)), 0);
  }

  #[test]
  fn sex_as_text() {
    assert_eq!(Sex::Woman.as_str(), "woman");
    assert_eq!(Sex::Man.as_str(), "man");
    assert_eq!(Sex::try_from(0).unwrap(), Sex::Woman);
    assert_eq!(Sex::try_from(1).unwrap(), Sex::Man);
  }

  #[test]
  fn sex_rejects_out_of_range_flags() {
    assert!(matches!(Sex::try_from(2), Err(Error::InvalidSex(2))));
    assert!(matches!(Sex::try_from(-1), Err(Error::InvalidSex(-1))));
  }

  #[test]
  fn validation_accepts_alphabetic_names() {
    assert!(validate_name("name", "Alice").is_ok());
    assert!(validate_name("name", "José").is_ok());
  }

  #[test]
  fn validation_rejects_digits_punctuation_and_empty() {
    for bad in ["John2", "O'Brien", "", "Anne Marie", "Smith-Jones"] {
      let err = validate_name("surname", bad).unwrap_err();
      assert!(
        matches!(&err, Error::Validation { field: "surname", value } if value == bad),
        "{bad:?} should be rejected, got {err:?}"
      );
    }
  }

  #[test]
  fn fields_validate_checks_both_names() {
    let mut fields =
      PersonFields::new("Ada", "Lovelace", date(1815, 12, 10), Sex::Woman, "London");
    assert!(fields.validate().is_ok());

    fields.surname = "L0velace".into();
    assert!(matches!(
      fields.validate(),
      Err(Error::Validation { field: "surname", .. })
    ));
  }

  #[test]
  fn parse_birthday_formats() {
    assert_eq!(parse_birthday("2000-01-01").unwrap(), date(2000, 1, 1));
    assert_eq!(parse_birthday("1999-12-31 00:00:00").unwrap(), date(1999, 12, 31));
    assert!(matches!(
      parse_birthday("31/12/1999"),
      Err(Error::InvalidBirthday(_))
    ));
  }

  #[test]
  fn view_serializes_derived_fields() {
    let fields =
      PersonFields::new("Alan", "Turing", date(2000, 1, 1), Sex::Man, "London");
    let view = PersonView::new(Some(7), &fields, date(2024, 6, 15));

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["age"], 24);
    assert_eq!(json["sex"], "man");
    assert_eq!(json["birthday"], "2000-01-01");
    assert_eq!(json["birth_city"], "London");
  }
}
