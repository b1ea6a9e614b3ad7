//! Error types for the entity registry.

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Structural errors raised by registry bookkeeping.
///
/// Both variants indicate a desynchronization between the adapter and the
/// engine rather than a recoverable runtime condition: callers are expected
/// to propagate them with `?`, not to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An entity with the given key is already registered.
    #[error("duplicate key: an entity keyed {key} already exists")]
    DuplicateKey {
        /// Debug rendering of the offending key.
        key: String,
    },

    /// No entity with the given key is registered.
    #[error("missing key: no entity keyed {key}")]
    MissingKey {
        /// Debug rendering of the offending key.
        key: String,
    },
}

impl RegistryError {
    /// Create a `DuplicateKey` error from any debug-printable key.
    pub fn duplicate(key: impl std::fmt::Debug) -> Self {
        Self::DuplicateKey {
            key: format!("{key:?}"),
        }
    }

    /// Create a `MissingKey` error from any debug-printable key.
    pub fn missing(key: impl std::fmt::Debug) -> Self {
        Self::MissingKey {
            key: format!("{key:?}"),
        }
    }
}
