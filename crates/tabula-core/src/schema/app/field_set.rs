use crate::schema::{Kind, Name};

use indexmap::IndexMap;

/// A field as submitted by a caller: name and kind, no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: Name,
    pub kind: Kind,
}

/// An ordered, duplicate-free list of field definitions.
///
/// Equality ignores order: two sets are equal when they carry the same names
/// with the same kinds.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: IndexMap<Name, Kind>,
}

impl FieldSet {
    /// Builds a set from definitions that already passed validation. Later
    /// duplicates overwrite earlier ones.
    pub fn from_defs(defs: Vec<FieldDef>) -> FieldSet {
        FieldSet {
            fields: defs.into_iter().map(|def| (def.name, def.kind)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Kind> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Name, Kind)> + '_ {
        self.fields.iter().map(|(name, kind)| (name, *kind))
    }

    pub(crate) fn insert(&mut self, name: Name, kind: Kind) -> bool {
        self.fields.insert(name, kind).is_none()
    }
}

impl PartialEq for FieldSet {
    fn eq(&self, other: &FieldSet) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, kind)| other.fields.get(name) == Some(kind))
    }
}

impl Eq for FieldSet {}
