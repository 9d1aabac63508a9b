use crate::schema::db;

#[derive(Debug)]
pub struct Capability {
    /// Column storage types supported by the database
    pub storage_types: StorageTypes,

    /// Which structural changes the database performs in place.
    pub schema_mutations: SchemaMutations,

    /// DDL statements participate in transactions and roll back with them.
    pub transactional_ddl: bool,
}

#[derive(Debug)]
pub struct StorageTypes {
    /// The storage type of a text column when no bound is configured.
    pub default_string_type: db::Type,

    /// When `Some` the database supports varchar types with the specified upper
    /// limit.
    pub varchar: Option<u64>,
}

#[derive(Debug)]
pub struct SchemaMutations {
    /// `ALTER COLUMN ... TYPE` is supported. When false, retyping a column
    /// requires rebuilding the table.
    pub alter_column_type: bool,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        storage_types: StorageTypes::SQLITE,
        schema_mutations: SchemaMutations {
            alter_column_type: false,
        },
        transactional_ddl: true,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        storage_types: StorageTypes::POSTGRESQL,
        schema_mutations: SchemaMutations {
            alter_column_type: true,
        },
        ..Self::SQLITE
    };

    /// Returns the storage type of text columns bounded by `max`, clamped to
    /// what the database supports.
    pub fn text_type(&self, max: u64) -> db::Type {
        match self.storage_types.varchar {
            Some(limit) => db::Type::VarChar(max.min(limit)),
            None => self.storage_types.default_string_type.clone(),
        }
    }
}

impl StorageTypes {
    /// SQLite storage types
    pub const SQLITE: StorageTypes = StorageTypes {
        default_string_type: db::Type::VarChar(255),

        // SQLite treats any type containing "CHAR" as having TEXT affinity and
        // ignores the length specifier. The only hard limit is
        // SQLITE_MAX_LENGTH, 1 billion by default. Bounds on text values are
        // enforced before the write.
        varchar: Some(1_000_000_000),
    };

    pub const POSTGRESQL: StorageTypes = StorageTypes {
        default_string_type: db::Type::VarChar(255),

        // The maximum n you can specify is 10 485 760 characters.
        varchar: Some(10_485_760),
    };
}
