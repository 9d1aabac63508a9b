use super::{
    app::{Field, FieldDef, FieldId, FieldSet, Model},
    Kind, Name,
};

/// An existing field whose kind changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retype {
    pub name: Name,
    pub from: Kind,
    pub to: Kind,
}

/// Difference between a model's current fields and a submitted field set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsDiff {
    /// Fields only in the submitted set, in submission order
    pub insertions: Vec<FieldDef>,

    /// Fields in both with a different kind, in current field order
    pub retypes: Vec<Retype>,

    /// Fields only in the current list, in current field order
    pub deletions: Vec<Name>,
}

impl FieldsDiff {
    pub fn between(current: &[Field], next: &FieldSet) -> FieldsDiff {
        let mut diff = FieldsDiff::default();

        for field in current {
            match next.get(field.name.as_str()) {
                Some(kind) if kind != field.kind => diff.retypes.push(Retype {
                    name: field.name.clone(),
                    from: field.kind,
                    to: kind,
                }),
                Some(_) => {}
                None => diff.deletions.push(field.name.clone()),
            }
        }

        for (name, kind) in next.iter() {
            if !current.iter().any(|field| field.name == *name) {
                diff.insertions.push(FieldDef {
                    name: name.clone(),
                    kind,
                });
            }
        }

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.retypes.is_empty() && self.deletions.is_empty()
    }

    /// The field list after applying the diff to `model`.
    ///
    /// Surviving fields keep their identity and position with retypes applied;
    /// insertions follow in submission order with ids from `next_id`.
    pub fn apply(&self, model: &Model, mut next_id: impl FnMut() -> FieldId) -> Vec<Field> {
        let mut fields: Vec<Field> = model
            .fields
            .iter()
            .filter(|field| !self.deletions.contains(&field.name))
            .map(|field| {
                let mut field = field.clone();
                if let Some(retype) = self.retypes.iter().find(|r| r.name == field.name) {
                    field.kind = retype.to;
                }
                field
            })
            .collect();

        fields.extend(self.insertions.iter().map(|def| Field {
            id: next_id(),
            model: model.id,
            name: def.name.clone(),
            kind: def.kind,
        }));

        fields
    }
}
