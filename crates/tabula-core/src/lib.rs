pub mod driver;
pub use driver::Connection;

mod error;
pub use error::{Error, ErrorReport, IntoError};

pub mod schema;

pub mod stmt;

pub mod validate;

pub use async_trait::async_trait;

/// A Result type alias that uses Tabula's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything needed to work with errors beyond the [`Error`] type itself.
pub mod errors {
    pub use crate::error::{Detail, ErrorReport, Mismatch, Rule, TypeMismatch};
}
