//! Encoding and decoding helpers between domain types and the plain values
//! stored in the `person` table.
//!
//! Birthdays are stored as `YYYY-MM-DD` text and sex as a 0/1 integer.

use census_core::{
  Filter, FilterValue, Operator, Person, PersonField, PersonFields, Sex,
  person::parse_birthday,
};
use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::Result;

// ─── Birthday ────────────────────────────────────────────────────────────────

pub fn encode_birthday(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_birthday(s: &str) -> Result<NaiveDate> { Ok(parse_birthday(s)?) }

// ─── Sex ─────────────────────────────────────────────────────────────────────

pub fn encode_sex(s: Sex) -> i64 { s.flag() }

pub fn decode_sex(v: i64) -> Result<Sex> { Ok(Sex::try_from(v)?) }

// ─── Filters ─────────────────────────────────────────────────────────────────

pub fn encode_field(f: PersonField) -> &'static str {
  match f {
    PersonField::Id => "id",
    PersonField::Name => "name",
    PersonField::Surname => "surname",
    PersonField::Birthday => "birthday",
    PersonField::Sex => "sex",
    PersonField::BirthCity => "birth_city",
  }
}

pub fn encode_operator(op: Operator) -> &'static str {
  match op {
    Operator::Eq => "=",
    Operator::Ne => "<>",
    Operator::Lt => "<",
    Operator::Le => "<=",
    Operator::Gt => ">",
    Operator::Ge => ">=",
    Operator::Like => "LIKE",
  }
}

pub fn encode_filter_value(v: &FilterValue) -> Value {
  match v {
    FilterValue::Integer(i) => Value::Integer(*i),
    FilterValue::Text(s) => Value::Text(s.clone()),
    FilterValue::Date(d) => Value::Text(encode_birthday(*d)),
    FilterValue::Sex(s) => Value::Integer(encode_sex(*s)),
  }
}

pub fn encode_filter(filter: &Filter) -> (&'static str, &'static str, Value) {
  (
    encode_field(filter.field),
    encode_operator(filter.op),
    encode_filter_value(&filter.value),
  )
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str = "id, name, surname, birthday, sex, birth_city";

/// Raw values read directly from a `person` row.
pub struct RawPerson {
  pub id:         i64,
  pub name:       String,
  pub surname:    String,
  pub birthday:   String,
  pub sex:        i64,
  pub birth_city: String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      surname:    row.get(2)?,
      birthday:   row.get(3)?,
      sex:        row.get(4)?,
      birth_city: row.get(5)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:     self.id,
      fields: PersonFields {
        name:       self.name,
        surname:    self.surname,
        birthday:   decode_birthday(&self.birthday)?,
        sex:        decode_sex(self.sex)?,
        birth_city: self.birth_city,
      },
    })
  }
}
