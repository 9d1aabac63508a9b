use crate::{
    error::TypeMismatch,
    schema::app::Model,
    stmt::Row,
    Error, Result,
};

/// Checks a populate batch against `model`'s current fields.
///
/// Returns the rows with lowercased field names. Keys of one row that only
/// differ by case fail with `DuplicateFieldName`. Unknown fields and type
/// mismatches are accumulated over the entire batch before failing, so one
/// bad row rejects the batch with the complete picture. Text values must be
/// non-blank and at most `text_max_length` characters.
pub fn rows(model: &Model, rows: Vec<Row>, text_max_length: u64) -> Result<Vec<Row>> {
    if rows.is_empty() || rows.iter().any(Row::is_empty) {
        return Err(Error::empty_row_set());
    }

    let rows = rows
        .into_iter()
        .map(lowercase_names)
        .collect::<Result<Vec<_>>>()?;

    let mut unknown_fields: Vec<String> = vec![];
    let mut mismatches: Vec<TypeMismatch> = vec![];

    for row in &rows {
        for (name, value) in row.iter() {
            match model.field(name) {
                None => {
                    if !unknown_fields.iter().any(|n| n == name) {
                        unknown_fields.push(name.to_string());
                    }
                }
                Some(field) if !field.kind.accepts(value) => {
                    if !mismatches.iter().any(|m| m.field_name == name) {
                        mismatches.push(TypeMismatch {
                            field_name: name.to_string(),
                            expected: field.kind,
                        });
                    }
                }
                Some(_) => {}
            }
        }
    }

    if !unknown_fields.is_empty() || !mismatches.is_empty() {
        return Err(Error::row_conformance(unknown_fields, mismatches));
    }

    for row in &rows {
        for (name, value) in row.iter() {
            if let Some(text) = value.as_str() {
                text_value(name, text, text_max_length)?;
            }
        }
    }

    Ok(rows)
}

/// Keys that collide once lowercased would silently overwrite each other.
fn lowercase_names(row: Row) -> Result<Row> {
    let mut lowered = Row::with_capacity(row.len());

    for (name, value) in row {
        let name = name.to_lowercase();
        if lowered.contains(&name) {
            return Err(Error::duplicate_field_name(name));
        }
        lowered.insert(name, value);
    }

    Ok(lowered)
}

fn text_value(name: &str, text: &str, max: u64) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::blank_value(format!("value of field `{name}`")));
    }

    let len = text.chars().count();
    if len as u64 > max {
        return Err(Error::value_too_long(
            format!("value of field `{name}`"),
            len,
            max as usize,
        ));
    }

    Ok(())
}
