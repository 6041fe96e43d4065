//! Parameterized SQL fragments built from structured input.
//!
//! Only column names and operators from fixed tables are ever written into
//! the SQL text; every caller-supplied value becomes a bound parameter.

use census_core::Filter;
use rusqlite::types::Value;

use crate::encode::encode_filter;

/// SQL text plus the values bound to it. For [`id_array`] the values are the
/// elements of one array parameter.
#[derive(Debug, Default)]
pub struct Bound {
  pub sql:    String,
  pub params: Vec<Value>,
}

/// Render `filters` as `WHERE a = ?1 AND b < ?2`, or an empty string when
/// there are none.
pub fn where_clause(filters: &[Filter]) -> Bound {
  if filters.is_empty() {
    return Bound::default();
  }

  let mut conds = Vec::with_capacity(filters.len());
  let mut params = Vec::with_capacity(filters.len());
  for (i, filter) in filters.iter().enumerate() {
    let (column, op, value) = encode_filter(filter);
    conds.push(format!("{column} {op} ?{}", i + 1));
    params.push(value);
  }

  Bound { sql: format!("WHERE {}", conds.join(" AND ")), params }
}

/// Bind `ids` as the single array parameter of `id IN rarray(?1)`.
///
/// One parameter regardless of length, so the list is not bounded by
/// SQLite's host-parameter limit.
pub fn id_array(ids: &[i64]) -> Bound {
  let values = ids.iter().copied().map(Value::Integer).collect();
  Bound { sql: "rarray(?1)".to_owned(), params: values }
}

#[cfg(test)]
mod tests {
  use census_core::{PersonField, Sex};
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn no_filters_no_where() {
    let bound = where_clause(&[]);
    assert!(bound.sql.is_empty());
    assert!(bound.params.is_empty());
  }

  #[test]
  fn filters_join_with_and() {
    let filters = [
      Filter::eq(PersonField::Sex, Sex::Man),
      Filter::lt(
        PersonField::Birthday,
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
      ),
      Filter::like(PersonField::BirthCity, "New%"),
    ];
    let bound = where_clause(&filters);

    assert_eq!(
      bound.sql,
      "WHERE sex = ?1 AND birthday < ?2 AND birth_city LIKE ?3"
    );
    assert_eq!(
      bound.params,
      vec![
        Value::Integer(1),
        Value::Text("1990-01-01".into()),
        Value::Text("New%".into()),
      ]
    );
  }

  #[test]
  fn hostile_values_stay_out_of_sql() {
    let hostile = "x'; DROP TABLE person; --";
    let bound = where_clause(&[Filter::eq(PersonField::Name, hostile)]);

    assert_eq!(bound.sql, "WHERE name = ?1");
    assert_eq!(bound.params, vec![Value::Text(hostile.into())]);
  }

  #[test]
  fn id_array_is_one_parameter() {
    let bound = id_array(&[2, 5, 9]);
    assert_eq!(bound.sql, "rarray(?1)");
    assert_eq!(
      bound.params,
      vec![Value::Integer(2), Value::Integer(5), Value::Integer(9)]
    );
  }
}
