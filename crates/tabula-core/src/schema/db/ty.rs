/// Database-level storage types of physical columns.
///
/// These are the types that appear in `CREATE TABLE` and `ALTER TABLE`
/// statements. Each [`Kind`](crate::schema::Kind) maps to exactly one of them
/// through [`Mapping`](crate::schema::Mapping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// Text type with an explicit maximum length
    VarChar(u64),
}

impl Type {
    /// Returns true if values stored in this type are text.
    pub fn is_text(&self) -> bool {
        matches!(self, Type::VarChar(_))
    }
}
