use super::Error;

/// Error when a structural migration step is rejected by storage.
///
/// The physical table may be ahead of the registry afterwards, so the caller
/// has to re-fetch the model before retrying.
#[derive(Debug)]
pub(super) struct MigrationFailed {
    model: Box<str>,
}

impl std::error::Error for MigrationFailed {}

impl core::fmt::Display for MigrationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "migration of model `{}` failed; state indeterminate, re-fetch the model before retrying",
            self.model
        )
    }
}

impl Error {
    /// Creates a migration failure for the named model.
    pub fn migration_failed(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MigrationFailed(MigrationFailed {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a migration failure.
    pub fn is_migration_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MigrationFailed(_))
    }
}
