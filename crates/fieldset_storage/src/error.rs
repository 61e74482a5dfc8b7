//! Error types for fieldset storage.

use fieldset_model::{HostId, ItemId};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No bundle definition exists under the given machine name.
    #[error("bundle not found: {name}")]
    BundleNotFound {
        /// Machine name of the bundle.
        name: String,
    },

    /// No item exists under the given id.
    #[error("item not found: {id}")]
    ItemNotFound {
        /// The item id that was not found.
        id: ItemId,
    },

    /// No host entity exists under the given type and id.
    #[error("host not found: {host_type}/{id}")]
    HostNotFound {
        /// The host entity type.
        host_type: String,
        /// The host id that was not found.
        id: HostId,
    },

    /// The host type carries no reference field for the bundle.
    #[error("host type {host_type} has no field for bundle {bundle}")]
    HostFieldMissing {
        /// The host entity type.
        host_type: String,
        /// The bundle machine name.
        bundle: String,
    },

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why the operation is invalid.
        message: String,
    },
}

impl StorageError {
    /// Creates a bundle-not-found error.
    pub fn bundle_not_found(name: impl Into<String>) -> Self {
        Self::BundleNotFound { name: name.into() }
    }

    /// Creates an item-not-found error.
    #[must_use]
    pub fn item_not_found(id: ItemId) -> Self {
        Self::ItemNotFound { id }
    }

    /// Creates a host-not-found error.
    pub fn host_not_found(host_type: impl Into<String>, id: HostId) -> Self {
        Self::HostNotFound {
            host_type: host_type.into(),
            id,
        }
    }

    /// Creates a host-field-missing error.
    pub fn host_field_missing(host_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self::HostFieldMissing {
            host_type: host_type.into(),
            bundle: bundle.into(),
        }
    }

    /// Creates an invalid-operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}
