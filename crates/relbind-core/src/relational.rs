//! Relational handles
//!
//! The binding layer only stores and compares these; building and
//! validating the relational model happens elsewhere.

mod table;
pub use table::Table;

mod value;
pub use value::{Column, DerivedValue, Value};
