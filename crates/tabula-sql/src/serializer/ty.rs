use super::{Flavor, Params, ToSql};

use tabula_core::schema::db;

impl ToSql for &db::Type {
    fn to_sql<T: Params>(self, f: &mut super::Formatter<'_, T>) {
        match (self, f.serializer.flavor) {
            (db::Type::Boolean, _) => fmt!(f, "BOOLEAN"),
            // SQLite only aliases the row id for exactly `INTEGER`
            (db::Type::Integer(_), Flavor::Sqlite) => fmt!(f, "INTEGER"),
            (db::Type::Integer(1..=2), Flavor::Postgresql) => fmt!(f, "SMALLINT"),
            (db::Type::Integer(3..=4), Flavor::Postgresql) => fmt!(f, "INTEGER"),
            (db::Type::Integer(_), Flavor::Postgresql) => fmt!(f, "BIGINT"),
            (db::Type::VarChar(size), _) => {
                let size = size.to_string();
                fmt!(f, "VARCHAR(" size.as_str() ")")
            }
        }
    }
}
