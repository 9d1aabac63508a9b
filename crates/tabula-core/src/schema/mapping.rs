use super::{
    app::{Field, Model},
    db::{Column, Table},
    Name,
};

/// Default prefix of physical table names.
pub const DEFAULT_TABLE_NAME_PREFIX: &str = "tbl_";

/// Default bound of text columns and text values.
pub const DEFAULT_TEXT_MAX_LENGTH: u64 = 255;

/// Deterministic mapping from logical fields to physical columns.
///
/// The mapping has no side effects. It describes both the table a new model
/// materializes into and the target shape of a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub table_name_prefix: String,
    pub text_max_length: u64,
}

impl Mapping {
    pub fn table_name(&self, model: &Name) -> String {
        format!("{}{}", self.table_name_prefix, model)
    }

    /// One nullable column per field, in field order.
    pub fn map_fields(&self, fields: &[Field]) -> Vec<Column> {
        fields
            .iter()
            .map(|field| {
                Column::field(
                    field.name.as_str(),
                    field.kind.storage_ty(self.text_max_length),
                )
            })
            .collect()
    }

    pub fn table(&self, model: &Model) -> Table {
        let mut table = Table::new(self.table_name(&model.name));
        table.columns.extend(self.map_fields(&model.fields));
        table
    }
}

impl Default for Mapping {
    fn default() -> Mapping {
        Mapping {
            table_name_prefix: DEFAULT_TABLE_NAME_PREFIX.to_string(),
            text_max_length: DEFAULT_TEXT_MAX_LENGTH,
        }
    }
}
