use super::{Flavor, Ident, Params, ToSql};

use crate::stmt::Conversion;

use tabula_core::schema::db::Type;

/// A column reference rewritten into its new type.
pub(super) struct Converted<'a> {
    pub(super) column: &'a str,
    pub(super) conversion: &'a Conversion,
}

impl ToSql for Converted<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = Ident(self.column);

        match (&self.conversion.from, &self.conversion.to, f.serializer.flavor) {
            // Booleans render as words, matching what PostgreSQL produces
            (Type::Boolean, to, Flavor::Sqlite) if to.is_text() => fmt!(
                f,
                "CASE WHEN " Ident(self.column) " IS NULL THEN NULL WHEN " column
                " THEN 'true' ELSE 'false' END"
            ),
            (_, to, Flavor::Sqlite) if to.is_text() => fmt!(f, "CAST(" column " AS TEXT)"),
            (_, to, Flavor::Sqlite) => fmt!(f, "CAST(" column " AS " to ")"),
            (_, to, Flavor::Postgresql) => fmt!(f, column "::" to),
        }
    }
}
