use super::{Conversion, Name, Statement};

/// A statement to copy rows from one table to another.
///
/// Generates: `INSERT INTO "target" ("t_col1", "t_col2") SELECT "s_col1", "s_col2" FROM "source"`,
/// wrapping source columns whose type changes in a conversion.
#[derive(Debug, Clone)]
pub struct CopyTable {
    /// Source table name.
    pub source: Name,

    /// Target table name.
    pub target: Name,

    pub columns: Vec<CopyColumn>,
}

#[derive(Debug, Clone)]
pub struct CopyColumn {
    pub target: Name,
    pub source: Name,
    pub conversion: Option<Conversion>,
}

impl Statement {
    /// Creates a statement that copies rows from one table to another.
    pub fn copy_table(source: Name, target: Name, columns: Vec<CopyColumn>) -> Self {
        CopyTable {
            source,
            target,
            columns,
        }
        .into()
    }
}

impl From<CopyTable> for Statement {
    fn from(value: CopyTable) -> Self {
        Self::CopyTable(value)
    }
}
