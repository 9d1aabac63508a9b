use tabula_core::{
    driver,
    schema::db::{self, Column},
};

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: db::Type,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl ColumnDef {
    pub(crate) fn from_schema(column: &Column, storage_types: &driver::StorageTypes) -> ColumnDef {
        let ty = match (&column.storage_ty, storage_types.varchar) {
            (db::Type::VarChar(n), Some(limit)) if *n > limit => db::Type::VarChar(limit),
            (db::Type::VarChar(_), None) => storage_types.default_string_type.clone(),
            (ty, _) => ty.clone(),
        };

        ColumnDef {
            name: column.name.clone(),
            ty,
            not_null: !column.nullable,
            primary_key: column.primary_key,
            auto_increment: column.auto_increment,
        }
    }
}
