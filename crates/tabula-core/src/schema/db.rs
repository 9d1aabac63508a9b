mod column;
pub use column::{Column, ColumnsDiff, ColumnsDiffItem};

mod migration;
pub use migration::{Migration, MigrationStep};

mod table;
pub use table::{Table, ROW_ID_COLUMN};

mod ty;
pub use ty::Type;
