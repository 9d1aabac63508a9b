mod field;
pub use field::{Field, FieldId};

mod field_set;
pub use field_set::{FieldDef, FieldSet};

mod model;
pub use model::{Model, ModelId};
