//! Error types for the request-facing layer.

use fieldset_storage::StorageError;
use thiserror::Error;

/// Result type for handler and form operations.
pub type WebResult<T> = Result<T, WebError>;

/// Errors surfaced by handlers and forms.
///
/// Capacity problems and save failures are not errors here: they are
/// reported through the messenger as inline notices, per the module's
/// error-handling contract. This enum covers the failures that abort a
/// request before or during storage access.
#[derive(Debug, Error)]
pub enum WebError {
    /// A route parameter referenced an entity that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of entity was looked up.
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// A route parameter was missing or unparsable.
    #[error("bad route parameter: {name}")]
    BadParameter {
        /// Name of the parameter.
        name: &'static str,
    },

    /// Storage-service failure, propagated to the framework's generic
    /// exception handling.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl WebError {
    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates a bad-parameter error.
    #[must_use]
    pub fn bad_parameter(name: &'static str) -> Self {
        Self::BadParameter { name }
    }
}
