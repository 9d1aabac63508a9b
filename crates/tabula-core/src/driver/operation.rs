use crate::{schema::db::Column, stmt::ValueRecord};

#[derive(Debug)]
pub enum Operation {
    /// Write records into a table
    Insert(Insert),

    /// Read every record of a table in insertion order
    Scan(Scan),
}

/// Writes one record per entry of `rows`, all or nothing.
#[derive(Debug)]
pub struct Insert {
    pub table: String,

    /// Columns each record supplies, in record order
    pub columns: Vec<String>,

    pub rows: Vec<ValueRecord>,
}

/// Reads `columns` from every record of `table`, ordered by row identity.
///
/// Each returned record holds one value per requested column, decoded
/// according to the column's storage type. NULL columns come back as
/// `Value::Null`.
#[derive(Debug)]
pub struct Scan {
    pub table: String,
    pub columns: Vec<Column>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Scan> for Operation {
    fn from(value: Scan) -> Self {
        Self::Scan(value)
    }
}
