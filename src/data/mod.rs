//! Tabular dataset model.
//!
//! A dataset is an ordered set of named columns, each with a declared type.
//! Lookups by name fail with [`Error::MissingColumn`](crate::Error::MissingColumn).

mod frame;
mod loader;
mod value;

pub use frame::{Column, Dataset};
pub use value::{Category, DType, Value};
