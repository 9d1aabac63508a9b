use super::{Formatter, Params, ToSql};

use crate::stmt;

/// A double-quoted identifier. Embedded quotes are doubled.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('"');
        for c in self.0.as_ref().chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}

impl ToSql for &stmt::Name {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.0));
    }
}
