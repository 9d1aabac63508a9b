use super::{FieldDef, ModelId};
use crate::schema::{Kind, Name};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One named, typed attribute of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: FieldId,

    /// The owning model
    pub model: ModelId,

    /// Unique within the owning model
    pub name: Name,

    pub kind: Kind,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u64);

impl Field {
    pub fn def(&self) -> FieldDef {
        FieldDef {
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.kind)
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({})", self.0)
    }
}
