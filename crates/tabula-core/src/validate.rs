//! Input rules applied before anything reaches the registry or storage.
//!
//! Every function here is pure: it inspects caller input against the current
//! model and either returns the sanitized form or the first rule violation.
//! Row conformance is the exception to "first violation": it inspects the
//! whole batch and reports every unknown field and every mismatch at once.

mod fields;
pub use fields::{field_set, model_name};

mod retype;
pub use retype::retypes;

mod rows;
pub use rows::rows;
