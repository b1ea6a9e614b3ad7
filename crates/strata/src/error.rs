//! Error types for the layout engine.

use strata_core::RegistryError;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised by structural layout operations.
///
/// These indicate adapter/engine desynchronization and are meant to abort
/// the offending operation loudly; they are never absorbed internally.
/// Drag-gesture rejections are not errors (see [`crate::drag::DragError`]
/// for the one recoverable payload case, which the engine absorbs at the
/// gesture boundary).
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A registry add/remove/lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
