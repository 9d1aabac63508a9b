use tabula_core::schema::db;

/// How a column's existing values are rewritten when its type changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub from: db::Type,
    pub to: db::Type,
}

impl Conversion {
    /// Returns `None` when the types are equal and values copy as-is.
    pub fn between(from: &db::Type, to: &db::Type) -> Option<Conversion> {
        if from == to {
            None
        } else {
            Some(Conversion {
                from: from.clone(),
                to: to.clone(),
            })
        }
    }
}
