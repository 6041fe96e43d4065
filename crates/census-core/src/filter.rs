//! Structured filter criteria for [`crate::PersonCollection`].
//!
//! A filter names a column by enum, never by string, and carries its operand
//! as a typed value. Backends bind the value as a statement parameter.

use chrono::NaiveDate;

use crate::person::Sex;

/// A filterable column of the `person` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
  Id,
  Name,
  Surname,
  Birthday,
  Sex,
  BirthCity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Eq,
  Ne,
  Lt,
  Le,
  Gt,
  Ge,
  /// SQL `LIKE` pattern match (`%` and `_` wildcards).
  Like,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
  Integer(i64),
  Text(String),
  Date(NaiveDate),
  Sex(Sex),
}

impl From<i64> for FilterValue {
  fn from(v: i64) -> Self { Self::Integer(v) }
}

impl From<&str> for FilterValue {
  fn from(v: &str) -> Self { Self::Text(v.to_owned()) }
}

impl From<String> for FilterValue {
  fn from(v: String) -> Self { Self::Text(v) }
}

impl From<NaiveDate> for FilterValue {
  fn from(v: NaiveDate) -> Self { Self::Date(v) }
}

impl From<Sex> for FilterValue {
  fn from(v: Sex) -> Self { Self::Sex(v) }
}

/// One `(field, operator, value)` criterion. A list of filters is a
/// conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
  pub field: PersonField,
  pub op:    Operator,
  pub value: FilterValue,
}

impl Filter {
  pub fn new(field: PersonField, op: Operator, value: impl Into<FilterValue>) -> Self {
    Self { field, op, value: value.into() }
  }

  pub fn eq(field: PersonField, value: impl Into<FilterValue>) -> Self {
    Self::new(field, Operator::Eq, value)
  }

  pub fn ne(field: PersonField, value: impl Into<FilterValue>) -> Self {
    Self::new(field, Operator::Ne, value)
  }

  pub fn lt(field: PersonField, value: impl Into<FilterValue>) -> Self {
    Self::new(field, Operator::Lt, value)
  }

  pub fn le(field: PersonField, value: impl Into<FilterValue>) -> Self {
    Self::new(field, Operator::Le, value)
  }

  pub fn gt(field: PersonField, value: impl Into<FilterValue>) -> Self {
    Self::new(field, Operator::Gt, value)
  }

  pub fn ge(field: PersonField, value: impl Into<FilterValue>) -> Self {
    Self::new(field, Operator::Ge, value)
  }

  pub fn like(field: PersonField, pattern: impl Into<String>) -> Self {
    Self::new(field, Operator::Like, FilterValue::Text(pattern.into()))
  }
}
