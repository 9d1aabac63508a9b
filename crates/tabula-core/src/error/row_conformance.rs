use super::Error;
use crate::schema::Kind;

/// A submitted value whose runtime type does not match its field's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    pub field_name: String,
    pub expected: Kind,
}

/// Error when a batch of rows references unknown fields or carries values of
/// the wrong type. Holds every offending field of the batch, not only the
/// first one.
#[derive(Debug)]
pub(super) struct RowConformanceError {
    pub(super) unknown_fields: Vec<String>,
    pub(super) mismatches: Vec<TypeMismatch>,
}

impl std::error::Error for RowConformanceError {}

impl core::fmt::Display for RowConformanceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("rows do not conform to the model")?;

        if !self.unknown_fields.is_empty() {
            f.write_str("; fields do NOT exist: ")?;
            for (i, name) in self.unknown_fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
            }
        }

        if !self.mismatches.is_empty() {
            f.write_str("; fields with wrong value type: ")?;
            for (i, mismatch) in self.mismatches.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{} (expected {})", mismatch.field_name, mismatch.expected)?;
            }
        }

        Ok(())
    }
}

impl Error {
    /// Creates a row conformance error from the accumulated findings.
    pub fn row_conformance(unknown_fields: Vec<String>, mismatches: Vec<TypeMismatch>) -> Error {
        Error::from(super::ErrorKind::RowConformance(RowConformanceError {
            unknown_fields,
            mismatches,
        }))
    }

    /// Returns `true` if this error is a row conformance error.
    pub fn is_row_conformance(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RowConformance(_))
    }

    /// Returns `true` if the batch referenced at least one unknown field.
    pub fn is_unknown_field(&self) -> bool {
        !self.unknown_fields().is_empty()
    }

    /// Returns `true` if the batch carried at least one mistyped value.
    pub fn is_type_mismatch(&self) -> bool {
        !self.type_mismatches().is_empty()
    }

    /// Unknown field names accumulated over the whole batch.
    pub fn unknown_fields(&self) -> &[String] {
        match self.kind() {
            super::ErrorKind::RowConformance(err) => &err.unknown_fields,
            _ => &[],
        }
    }

    /// Type mismatches accumulated over the whole batch.
    pub fn type_mismatches(&self) -> &[TypeMismatch] {
        match self.kind() {
            super::ErrorKind::RowConformance(err) => &err.mismatches,
            _ => &[],
        }
    }
}
