mod error;
pub use error::{Error, IntoError};

pub mod binding;
pub use binding::Metamodel;

pub mod domain;

pub mod relational;

/// A Result type alias that uses relbind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
