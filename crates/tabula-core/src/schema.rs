pub mod app;
pub mod db;

mod diff;
pub use diff::{FieldsDiff, Retype};

mod kind;
pub use kind::Kind;

pub mod mapping;
pub use mapping::Mapping;

mod name;
pub use name::{check_characters, Name, MAX_NAME_LEN};
