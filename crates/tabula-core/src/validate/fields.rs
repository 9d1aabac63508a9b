use crate::{
    schema::{
        app::{FieldDef, FieldSet},
        check_characters,
        db::ROW_ID_COLUMN,
        Kind, Name,
    },
    Error, Result,
};

/// Sanitizes a model name.
pub fn model_name(src: &str) -> Result<Name> {
    Name::parse(src, "model name")
}

/// Sanitizes a submitted `name -> kind` list into a field set.
///
/// Names and kind strings both go through the character rule. Names are
/// lowercased, so `Age` and `age` in one submission are duplicates.
pub fn field_set<I, K, V>(fields: I) -> Result<FieldSet>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut set = FieldSet::default();

    for (name, kind) in fields {
        let def = field(name.as_ref(), kind.as_ref())?;

        if !set.insert(def.name.clone(), def.kind) {
            return Err(Error::duplicate_field_name(def.name.as_str()));
        }
    }

    if set.is_empty() {
        return Err(Error::empty_field_set());
    }

    Ok(set)
}

fn field(name: &str, kind: &str) -> Result<FieldDef> {
    let name = Name::parse(name, "field name")?;

    if name == ROW_ID_COLUMN {
        return Err(Error::reserved_name(name.as_str()));
    }

    check_characters(kind)?;
    let kind = Kind::from_name(kind)?;

    Ok(FieldDef { name, kind })
}
