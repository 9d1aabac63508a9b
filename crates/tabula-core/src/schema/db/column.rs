use super::Type;

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The database storage type of the column.
    pub storage_ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is the table's primary key
    pub primary_key: bool,

    /// True if the column is an integer that is auto-incremented with each
    /// insertion of a new row.
    pub auto_increment: bool,
}

impl Column {
    /// A nullable column backing a model field.
    pub fn field(name: impl Into<String>, storage_ty: Type) -> Column {
        Column {
            name: name.into(),
            storage_ty,
            nullable: true,
            primary_key: false,
            auto_increment: false,
        }
    }

    fn has_diff(&self, other: &Column) -> bool {
        self.name != other.name
            || self.storage_ty != other.storage_ty
            || self.nullable != other.nullable
            || self.primary_key != other.primary_key
            || self.auto_increment != other.auto_increment
    }
}

/// Column-level difference between two tables.
///
/// Items are ordered adds first, then alters, then drops. Within each group
/// the order follows the column order of the table the item comes from.
#[derive(Debug)]
pub struct ColumnsDiff<'a> {
    items: Vec<ColumnsDiffItem<'a>>,
}

impl<'a> ColumnsDiff<'a> {
    pub fn from(from: &'a [Column], to: &'a [Column]) -> Self {
        let from_map = HashMap::<&str, &'a Column>::from_iter(
            from.iter().map(|from| (from.name.as_str(), from)),
        );
        let to_map =
            HashMap::<&str, &'a Column>::from_iter(to.iter().map(|to| (to.name.as_str(), to)));

        let mut items = vec![];

        for to in to {
            if !from_map.contains_key(to.name.as_str()) {
                items.push(ColumnsDiffItem::AddColumn(to));
            }
        }

        for from in from {
            if let Some(to) = to_map.get(from.name.as_str()) {
                if from.has_diff(to) {
                    items.push(ColumnsDiffItem::AlterColumn { from, to });
                }
            }
        }

        for from in from {
            if !to_map.contains_key(from.name.as_str()) {
                items.push(ColumnsDiffItem::DropColumn(from));
            }
        }

        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ColumnsDiffItem<'a>> + '_ {
        self.items.iter()
    }
}

impl<'a> IntoIterator for ColumnsDiff<'a> {
    type Item = ColumnsDiffItem<'a>;
    type IntoIter = std::vec::IntoIter<ColumnsDiffItem<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnsDiffItem<'a> {
    AddColumn(&'a Column),
    DropColumn(&'a Column),
    AlterColumn { from: &'a Column, to: &'a Column },
}
