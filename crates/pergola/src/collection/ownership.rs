//! Ownership hand-off between a view and its hosting composite.
//!
//! A direct view created for a host offers every item that becomes a member
//! of its sequence to that host, and asks the host to give the item up again
//! when it leaves. The hand-off is two-phase: a rejected offer rolls the
//! in-flight storage change back in full, while a failed release after the
//! offer succeeded propagates without touching storage. The invariant this
//! buys is that an item is never owned by two hosts at once; a replace is
//! deliberately not atomic across both of its sides.

use std::sync::Arc;

use thiserror::Error;

use super::error::{CollectionError, CollectionResult};

/// Failure reported by an [`ItemHost`].
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    /// Convenience constructor from anything stringy.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// An external composite that takes logical ownership of items while they are
/// members of a direct view.
///
/// Both methods are synchronous callback boundaries: the mutation that
/// triggered the call does not complete until the host returns, and a host
/// failure is part of that mutation's error contract.
pub trait ItemHost<T>: Send + Sync {
    /// Accept `item` as a logical child. Returning an error rejects the
    /// mutation that offered it.
    fn adopt(&self, item: &T) -> Result<(), HostError>;

    /// Give up logical ownership of `item`.
    fn release(&self, item: &T) -> Result<(), HostError>;
}

/// Run the two-phase ownership hand-off for a structural mutation.
///
/// `undo` reverses the storage-level change already performed; it runs only
/// when the host rejects the `incoming` item, so a rejected mutation has no
/// observable effect. A failed release of `outgoing` propagates as
/// [`CollectionError::OwnershipReleaseFailed`] with storage left mutated.
pub(crate) fn transfer<T>(
    host: Option<&Arc<dyn ItemHost<T>>>,
    incoming: Option<&T>,
    outgoing: Option<&T>,
    undo: impl FnOnce(),
) -> CollectionResult<()> {
    let Some(host) = host else {
        return Ok(());
    };

    if let Some(item) = incoming {
        if let Err(source) = host.adopt(item) {
            tracing::debug!(
                target: "pergola::collection",
                %source,
                "host rejected item, rolling back"
            );
            undo();
            return Err(CollectionError::OwnershipRejected { source });
        }
    }

    if let Some(item) = outgoing {
        if let Err(source) = host.release(item) {
            tracing::debug!(
                target: "pergola::collection",
                %source,
                "host failed to release item"
            );
            return Err(CollectionError::OwnershipReleaseFailed { source });
        }
    }

    Ok(())
}
