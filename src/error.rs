//! Error types for the public interface.
//!
//! Internally the crate propagates `anyhow` errors (aliased as `Res`). At the public boundary an
//! error is classified with an `ErrorType` so that a caller can decide how to recover, for
//! example by ignoring a `Storage` failure and carrying on with the in-memory state.

use std::fmt::{Debug, Display, Formatter};

/// Result type used inside the crate.
pub(crate) type Res<T> = std::result::Result<T, anyhow::Error>;

/// Result type returned by public functions.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad class of a failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A required field is missing or empty, an amount is negative, or an import payload is not
    /// a list of records.
    Validation,
    /// An update targeted an id that is not in the collection.
    NotFound,
    /// The backing key-value store could not be read or written.
    Storage,
    /// The home directory or its configuration file is missing or invalid.
    Config,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// A classified error with its full context chain.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub(crate) fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub(crate) fn validation(message: impl Display) -> Self {
        Self::new(ErrorType::Validation, anyhow::anyhow!("{message}"))
    }

    pub(crate) fn not_found(message: impl Display) -> Self {
        Self::new(ErrorType::NotFound, anyhow::anyhow!("{message}"))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn is_validation(&self) -> bool {
        self.error_type == ErrorType::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.error_type == ErrorType::NotFound
    }

    pub fn is_storage(&self) -> bool {
        self.error_type == ErrorType::Storage
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Classifies an internal result as it crosses into the public interface.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}
