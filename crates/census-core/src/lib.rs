//! Core types for the Census person store.
//!
//! Holds the domain model, validation rules, and the record and collection
//! layers. Those layers are generic over a [`store::PersonStore`] backend and
//! never touch a database directly.

pub mod collection;
pub mod error;
pub mod filter;
pub mod person;
pub mod record;
pub mod store;

pub use collection::PersonCollection;
pub use error::{Error, Result};
pub use filter::{Filter, FilterValue, Operator, PersonField};
pub use person::{Person, PersonFields, PersonView, Sex};
pub use record::PersonRecord;
pub use store::PersonStore;
