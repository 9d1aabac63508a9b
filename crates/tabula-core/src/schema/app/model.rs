use super::{Field, FieldSet};
use crate::schema::Name;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named logical schema and its current field list.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Uniquely identifies the model; assigned by the registry at creation
    pub id: ModelId,

    /// Unique, lowercased name of the model
    pub name: Name,

    /// Fields in insertion order
    pub fields: Vec<Field>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub u64);

impl Model {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &Name> + '_ {
        self.fields.iter().map(|field| &field.name)
    }

    /// The current field list as a (name, kind) set.
    pub fn field_set(&self) -> FieldSet {
        FieldSet::from_defs(self.fields.iter().map(Field::def).collect())
    }
}

impl From<ModelId> for u64 {
    fn from(value: ModelId) -> Self {
        value.0
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}
