use tabula_core::{
    schema::app::Model,
    stmt::{Row, Value, ValueRecord},
};

use serde::{ser::SerializeSeq, Serialize, Serializer};
use std::sync::Arc;

/// The rows of a model, re-expressed through the field list that was current
/// when the projection was taken.
///
/// Fields added after a row was written surface as `null`; dropped fields are
/// gone. Rows are built on demand and the projection can be iterated any
/// number of times.
#[derive(Debug, Clone)]
pub struct Projection {
    model: Arc<Model>,
    records: Vec<ValueRecord>,
}

/// Iterator over the rows of a [`Projection`].
#[derive(Debug)]
pub struct Iter<'a> {
    model: &'a Model,
    records: std::slice::Iter<'a, ValueRecord>,
}

impl Projection {
    pub(crate) fn new(model: Arc<Model>, records: Vec<ValueRecord>) -> Projection {
        Projection { model, records }
    }

    /// The model the rows are shaped by.
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            model: &self.model,
            records: self.records.iter(),
        }
    }

    pub fn to_rows(&self) -> Vec<Row> {
        self.iter().collect()
    }
}

impl Iterator for Iter<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let record = self.records.next()?;
        let mut row = Row::with_capacity(self.model.fields.len());

        for (index, field) in self.model.fields.iter().enumerate() {
            let value = record.get(index).cloned().unwrap_or(Value::Null);
            row.insert(field.name.as_str(), value);
        }

        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Projection {
    type Item = Row;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for row in self {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}
