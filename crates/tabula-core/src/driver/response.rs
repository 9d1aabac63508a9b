use crate::stmt::ValueStream;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, as a stream of records
    Values(ValueStream),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn value_stream(values: impl Into<ValueStream>) -> Self {
        Self {
            rows: Rows::Values(values.into()),
        }
    }
}

impl Rows {
    pub fn into_count(self) -> crate::Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => Err(crate::err!("expected a row count; got a value stream")),
        }
    }

    pub fn into_values(self) -> crate::Result<ValueStream> {
        match self {
            Rows::Values(values) => Ok(values),
            Rows::Count(count) => Err(crate::err!(
                "expected a value stream; got a row count of {count}"
            )),
        }
    }
}
