use super::{conversion::Converted, Comma, Flavor, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::AddColumn(stmt) => stmt.to_sql(f),
            stmt::Statement::AlterColumn(stmt) => stmt.to_sql(f),
            stmt::Statement::AlterTable(stmt) => stmt.to_sql(f),
            stmt::Statement::CopyTable(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::DropColumn(stmt) => stmt.to_sql(f),
            stmt::Statement::DropTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
        }
    }
}

struct Columns<'a>(&'a [stmt::ColumnDef]);

impl ToSql for Columns<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        for (index, column) in self.0.iter().enumerate() {
            fmt!(f, "\n    " column);
            if index < self.0.len() - 1 {
                fmt!(f, ",");
            }
        }

        fmt!(f, "\n");
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "ALTER TABLE " self.table " ADD COLUMN " self.column);
    }
}

impl ToSql for &stmt::AlterColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column_name = Ident(&self.column.name);
        let converted = Converted {
            column: &self.column.name,
            conversion: &self.conversion,
        };

        match f.serializer.flavor {
            Flavor::Postgresql => fmt!(
                f, "ALTER TABLE " self.table " ALTER COLUMN " column_name " TYPE " self.column.ty
                " USING " converted
            ),
            Flavor::Sqlite => {
                panic!("SQLite cannot change a column type in place; rebuild the table instead")
            }
        }
    }
}

impl ToSql for &stmt::AlterTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match &self.action {
            stmt::AlterTableAction::RenameTo(new_name) => {
                fmt!(f, "ALTER TABLE " self.name " RENAME TO " new_name);
            }
        }
    }
}

impl ToSql for &stmt::CopyTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let target_cols = Comma(self.columns.iter().map(|column| &column.target));
        let source_cols = Comma(self.columns.iter().map(SourceColumn));
        fmt!(f, "INSERT INTO " self.target " (" target_cols ") SELECT " source_cols " FROM " self.source);
    }
}

struct SourceColumn<'a>(&'a stmt::CopyColumn);

impl ToSql for SourceColumn<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match &self.0.conversion {
            Some(conversion) => fmt!(
                f,
                Converted {
                    column: &self.0.source.0,
                    conversion,
                }
            ),
            None => fmt!(f, self.0.source),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = Columns(&self.columns);

        fmt!(f, "CREATE TABLE " self.name " (" columns ")");
    }
}

impl ToSql for &stmt::DropColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "ALTER TABLE " self.table " DROP COLUMN " self.name);
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "DROP TABLE " self.name);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = Comma(&self.columns);

        fmt!(f, "INSERT INTO " self.table " (" columns ") VALUES ");

        let mut s = "";
        for row in &self.rows {
            let mut placeholders = Vec::with_capacity(row.len());
            for value in row {
                placeholders.push(f.params.push(value));
            }
            fmt!(f, s "(" Comma(placeholders) ")");
            s = ", ";
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = Comma(&self.columns);
        let order_by = self.order_by.as_ref().map(|column| (" ORDER BY ", column));

        fmt!(f, "SELECT " columns " FROM " self.table order_by);
    }
}
