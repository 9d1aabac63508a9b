mod add_column;
pub use add_column::AddColumn;

mod alter_column;
pub use alter_column::AlterColumn;

mod alter_table;
pub use alter_table::{AlterTable, AlterTableAction};

mod column_def;
pub use column_def::ColumnDef;

mod conversion;
pub use conversion::Conversion;

mod copy_table;
pub use copy_table::{CopyColumn, CopyTable};

mod create_table;
pub use create_table::CreateTable;

mod drop_column;
pub use drop_column::DropColumn;

mod drop_table;
pub use drop_table::DropTable;

mod insert;
pub use insert::Insert;

mod name;
pub use name::Name;

mod select;
pub use select::Select;

#[derive(Debug, Clone)]
pub enum Statement {
    AddColumn(AddColumn),
    AlterColumn(AlterColumn),
    AlterTable(AlterTable),
    CopyTable(CopyTable),
    CreateTable(CreateTable),
    DropColumn(DropColumn),
    DropTable(DropTable),
    Insert(Insert),
    Select(Select),
}
