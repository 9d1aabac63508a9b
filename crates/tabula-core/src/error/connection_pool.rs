use super::Error;

/// Error raised by the connection pool (creation or checkout).
#[derive(Debug)]
pub(super) struct ConnectionPoolError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionPoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionPoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "connection pool error: {}", self.inner)
    }
}

impl Error {
    /// Creates a connection pool error.
    pub fn connection_pool(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConnectionPool(ConnectionPoolError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a connection pool error.
    pub fn is_connection_pool(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ConnectionPool(_))
    }
}
