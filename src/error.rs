//! Unified error type.

use std::fmt;

/// The error type returned by strata handlers.
///
/// Expected HTTP outcomes (404, 422, etc.) belong on the
/// [`ResponseWriter`](crate::ResponseWriter), not in an `Error`. This type is
/// for failures the handler wants its caller to deal with: a database gone
/// away, an upstream timeout, an I/O fault. The chain and the recovery
/// boundary pass it through untouched — how to surface it is the host's call.
#[derive(Debug)]
pub struct Error(Box<dyn std::error::Error + Send + Sync>);

impl Error {
    /// Wraps any error value, including a bare message string.
    ///
    /// ```rust
    /// use strata::Error;
    ///
    /// Error::new("upstream unavailable");
    /// Error::new(std::io::Error::other("socket closed"));
    /// ```
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(Box::new(e))
    }
}
