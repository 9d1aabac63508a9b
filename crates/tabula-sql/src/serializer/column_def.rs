use super::{Flavor, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);

        fmt!(f, name " " self.ty);

        match (self.primary_key, self.auto_increment, f.serializer.flavor) {
            (true, true, Flavor::Sqlite) => fmt!(f, " PRIMARY KEY AUTOINCREMENT"),
            (true, true, Flavor::Postgresql) => {
                fmt!(f, " GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY")
            }
            (true, false, _) => fmt!(f, " PRIMARY KEY"),
            (false, _, _) if self.not_null => fmt!(f, " NOT NULL"),
            _ => {}
        }
    }
}
