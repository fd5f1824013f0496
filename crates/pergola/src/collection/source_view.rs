//! The externally sourced backing mode: a fixed snapshot plus the cursor.

use std::sync::Arc;

use parking_lot::RwLock;

use super::cursor::{self, BEFORE_FIRST, CursorState};
use super::error::{CollectionError, CollectionResult};
use super::events::ViewSignals;

/// A read-only view over contents handed in by an external source.
///
/// The sequence is fixed at construction; there is no mutation surface at
/// all, which is what lets the facade report `UnsupportedOperation` for list
/// mutators while in sourced mode. The cursor is fully functional and starts
/// before the first item regardless of whether the snapshot is empty.
pub struct SourceView<T> {
    items: Vec<T>,
    cursor: RwLock<CursorState<T>>,
    signals: Arc<ViewSignals<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> SourceView<T> {
    /// Creates a view over a snapshot of `source`.
    pub fn new(source: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: source.into_iter().collect(),
            cursor: RwLock::new(CursorState::default()),
            signals: Arc::new(ViewSignals::new()),
        }
    }

    /// Creates a view over nothing, used when the source is detached.
    pub fn empty() -> Self {
        Self::new([])
    }

    /// The signals this view emits.
    pub fn signals(&self) -> &Arc<ViewSignals<T>> {
        &self.signals
    }

    /// Returns the number of items in the snapshot.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> CollectionResult<T> {
        self.items
            .get(index)
            .cloned()
            .ok_or(CollectionError::IndexOutOfRange {
                index: index as isize,
                len: self.items.len(),
            })
    }

    /// Returns `true` if `item` is a member of the snapshot.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Returns the index of the first item equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    /// The snapshot as a slice.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Clones the snapshot out as a plain vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    /// The item under the cursor, if the cursor is on one.
    pub fn current_item(&self) -> Option<T> {
        self.cursor.read().item.clone()
    }

    /// The cursor position, in `[-1, len]`.
    pub fn current_position(&self) -> isize {
        self.cursor.read().position
    }

    /// Whether the cursor sits before the first item.
    pub fn is_before_first(&self) -> bool {
        self.cursor.read().position == BEFORE_FIRST
    }

    /// Whether the cursor sits past the last item.
    pub fn is_after_last(&self) -> bool {
        self.cursor.read().position == self.items.len() as isize
    }

    /// Moves the cursor to `position`, which must be in `[-1, len]`.
    ///
    /// Returns `Ok(false)` when a `current_changing` handler vetoes the move.
    pub fn move_current_to_position(&self, position: isize) -> CollectionResult<bool> {
        cursor::move_to_position(&self.signals, &self.cursor, &self.items, position)
    }

    /// Moves the cursor onto the first item equal to `item`, or before the
    /// first item when no such member exists.
    pub fn move_current_to(&self, item: &T) -> CollectionResult<bool> {
        match self.index_of(item) {
            Some(index) => self.move_current_to_position(index as isize),
            None => self.move_current_to_position(BEFORE_FIRST),
        }
    }

    /// Moves the cursor onto the first item, or before-first when empty.
    pub fn move_current_to_first(&self) -> CollectionResult<bool> {
        if self.items.is_empty() {
            self.move_current_to_position(BEFORE_FIRST)
        } else {
            self.move_current_to_position(0)
        }
    }

    /// Moves the cursor onto the last item, or before-first when empty.
    pub fn move_current_to_last(&self) -> CollectionResult<bool> {
        match self.items.len() {
            0 => self.move_current_to_position(BEFORE_FIRST),
            len => self.move_current_to_position(len as isize - 1),
        }
    }

    /// Advances the cursor one position, saturating at after-last.
    pub fn move_current_to_next(&self) -> CollectionResult<bool> {
        let target = (self.current_position() + 1).min(self.items.len() as isize);
        self.move_current_to_position(target)
    }

    /// Backs the cursor up one position, saturating at before-first.
    pub fn move_current_to_previous(&self) -> CollectionResult<bool> {
        let target = (self.current_position() - 1).max(BEFORE_FIRST);
        self.move_current_to_position(target)
    }

    /// Recomputes cursor validity against the snapshot.
    ///
    /// The snapshot never changes, so this only matters for cursors restored
    /// from outside; it keeps the surface uniform with the direct mode.
    pub fn refresh(&self) {
        cursor::revalidate(&self.signals, &self.cursor, &self.items);
    }
}
