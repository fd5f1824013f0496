//! Observable channels emitted by collection views.
//!
//! Every view exposes the same four channels, bundled as [`ViewSignals`]:
//!
//! - `property_changed`: a derived property ([`ViewProperty`]) changed value
//! - `collection_changed`: a structural change ([`CollectionChange`])
//! - `current_changing`: the cursor is about to move; cancelable in some paths
//! - `current_changed`: the cursor moved; re-read the current item
//!
//! Channels fire synchronously, in-line with the call that caused them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pergola_core::Signal;

/// Identifies which derived property of a view changed.
///
/// A notification is raised only when the property's value actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewProperty {
    /// Number of items in the view.
    Count,
    /// The item under the cursor.
    CurrentItem,
    /// The cursor position.
    CurrentPosition,
    /// Whether the cursor sits before the first item.
    IsBeforeFirst,
    /// Whether the cursor sits past the last item.
    IsAfterLast,
}

/// A structural change to the sequence behind a view.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionChange<T> {
    /// Items became members of the sequence, starting at `index`.
    ///
    /// Incremental inserts carry exactly one item; the synthetic add after a
    /// source swap carries the entire new contents.
    Add { items: Vec<T>, index: usize },
    /// The item at `index` left the sequence.
    Remove { item: T, index: usize },
    /// `old_item` at `index` was replaced by `item`.
    Replace { item: T, old_item: T, index: usize },
    /// The sequence changed wholesale; re-read everything.
    Reset,
}

/// Payload of the `current_changing` channel.
///
/// When [`is_cancelable`](Self::is_cancelable) is `true`, a handler may veto
/// the pending cursor move with [`cancel`](Self::cancel). The flag is shared
/// across every subscriber (including facade re-publication), so any one of
/// them can veto.
#[derive(Debug, Clone)]
pub struct CurrentChanging {
    cancelable: bool,
    canceled: Arc<AtomicBool>,
}

impl CurrentChanging {
    pub(crate) fn new(cancelable: bool) -> Self {
        Self {
            cancelable,
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a handler may veto this change.
    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Veto the pending cursor move. Ignored when the change is not cancelable.
    pub fn cancel(&self) {
        if self.cancelable {
            self.canceled.store(true, Ordering::SeqCst);
        }
    }

    pub(crate) fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// The four observable channels of a view.
///
/// Views emit on these; the facade re-publishes its active backing view's
/// channels under its own stable `ViewSignals` instance so observers never
/// need to know which backing mode is active.
pub struct ViewSignals<T> {
    /// A derived property changed value.
    pub property_changed: Signal<ViewProperty>,
    /// The sequence changed structurally.
    pub collection_changed: Signal<CollectionChange<T>>,
    /// The cursor is about to move.
    pub current_changing: Signal<CurrentChanging>,
    /// The cursor moved.
    pub current_changed: Signal<()>,
}

impl<T> ViewSignals<T> {
    /// Creates a fresh set of channels with no subscribers.
    pub fn new() -> Self {
        Self {
            property_changed: Signal::new(),
            collection_changed: Signal::new(),
            current_changing: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    /// Raises the changing/changed pair around `commit`. Not cancelable.
    pub(crate) fn emit_current_change<F>(&self, commit: F)
    where
        F: FnOnce(),
    {
        self.current_changing.emit(CurrentChanging::new(false));
        commit();
        self.current_changed.emit(());
    }

    /// Cancelable variant: returns `false` and skips `commit` if a handler
    /// vetoes the change.
    pub(crate) fn try_emit_current_change<F>(&self, commit: F) -> bool
    where
        F: FnOnce(),
    {
        let args = CurrentChanging::new(true);
        self.current_changing.emit(args.clone());
        if args.is_canceled() {
            return false;
        }
        commit();
        self.current_changed.emit(());
        true
    }
}

impl<T> Default for ViewSignals<T> {
    fn default() -> Self {
        Self::new()
    }
}
