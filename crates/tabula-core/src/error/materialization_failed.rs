use super::Error;

/// Error when the storage backend rejects a new table definition.
///
/// Used as context on top of the driver error that caused it.
#[derive(Debug)]
pub(super) struct MaterializationFailed {
    model: Box<str>,
}

impl std::error::Error for MaterializationFailed {}

impl core::fmt::Display for MaterializationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to materialize table for model `{}`; re-fetch the model before retrying",
            self.model
        )
    }
}

impl Error {
    /// Creates a materialization failure for the named model.
    pub fn materialization_failed(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MaterializationFailed(
            MaterializationFailed {
                model: model.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a materialization failure.
    pub fn is_materialization_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MaterializationFailed(_))
    }
}
