//! Error types for collection views.

use thiserror::Error;

use super::ownership::HostError;

/// Errors raised by collection views.
///
/// Every error is synchronous and raised directly from the call that caused
/// it; nothing is retried or swallowed internally. Index errors are detected
/// before any mutation, so a failed call with `IndexOutOfRange` has no
/// observable effect.
#[derive(Error, Debug)]
pub enum CollectionError {
    /// An index argument fell outside its documented bound.
    #[error("index {index} out of bounds for view of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// A mutating call was made against a source-backed collection.
    #[error("collection is backed by an external source and does not support list mutation")]
    UnsupportedOperation,

    /// The host declined to adopt an offered item. The in-flight structural
    /// change has been rolled back in full.
    #[error("host rejected ownership of the offered item")]
    OwnershipRejected {
        #[source]
        source: HostError,
    },

    /// The host failed to release an item it owned, after the point of no
    /// return. Storage is left in its new, already-mutated state.
    #[error("host failed to release a previously owned item")]
    OwnershipReleaseFailed {
        #[source]
        source: HostError,
    },
}

/// A specialized Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;
