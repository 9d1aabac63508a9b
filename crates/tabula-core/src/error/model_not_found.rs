use super::Error;

/// Error when a model id is not present in the registry.
#[derive(Debug)]
pub(super) struct ModelNotFound {
    pub(super) id: u64,
}

impl std::error::Error for ModelNotFound {}

impl core::fmt::Display for ModelNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model not found: id={}", self.id)
    }
}

impl Error {
    /// Creates a model not found error for the given model id.
    pub fn model_not_found(id: impl Into<u64>) -> Error {
        Error::from(super::ErrorKind::ModelNotFound(ModelNotFound { id: id.into() }))
    }

    /// Returns `true` if this error is a model not found error.
    pub fn is_model_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModelNotFound(_))
    }
}
