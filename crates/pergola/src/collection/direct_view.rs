//! The internally mutable backing mode: an ordered sequence plus the cursor.

use std::sync::Arc;

use parking_lot::RwLock;
use pergola_core::Property;

use super::cursor::{self, BEFORE_FIRST, CursorState, RemovalEffect};
use super::error::{CollectionError, CollectionResult};
use super::events::{CollectionChange, ViewProperty, ViewSignals};
use super::ownership::{ItemHost, transfer};

/// An ordered, duplicate-permitting sequence of items with a current-item
/// cursor, mutable through its own API.
///
/// Items entering or leaving the sequence are offered to the attached
/// [`ItemHost`], if any; a rejected offer rolls the mutation back so the call
/// has no observable effect.
///
/// # Example
///
/// ```
/// use pergola::collection::DirectView;
///
/// let view = DirectView::new();
/// view.add("apple".to_string()).unwrap();
/// view.add("banana".to_string()).unwrap();
///
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.index_of(&"banana".to_string()), Some(1));
///
/// // The cursor starts before the first item.
/// assert!(view.is_before_first());
/// view.move_current_to_first().unwrap();
/// assert_eq!(view.current_item(), Some("apple".to_string()));
/// ```
pub struct DirectView<T> {
    items: RwLock<Vec<T>>,
    cursor: RwLock<CursorState<T>>,
    count: Property<usize>,
    host: Option<Arc<dyn ItemHost<T>>>,
    signals: Arc<ViewSignals<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> DirectView<T> {
    /// Creates an empty view with no host.
    pub fn new() -> Self {
        Self::build(Vec::new(), None)
    }

    /// Creates an empty view whose items are offered to `host`.
    pub fn with_host(host: Arc<dyn ItemHost<T>>) -> Self {
        Self::build(Vec::new(), Some(host))
    }

    /// Creates a view over `items` without offering them to any host.
    pub fn from_items(items: Vec<T>) -> Self {
        Self::build(items, None)
    }

    fn build(items: Vec<T>, host: Option<Arc<dyn ItemHost<T>>>) -> Self {
        let count = Property::new(items.len());
        Self {
            items: RwLock::new(items),
            cursor: RwLock::new(CursorState::default()),
            count,
            host,
            signals: Arc::new(ViewSignals::new()),
        }
    }

    /// The signals this view emits.
    pub fn signals(&self) -> &Arc<ViewSignals<T>> {
        &self.signals
    }

    // -------------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------------

    /// Returns the number of items in the view.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> CollectionResult<T> {
        let items = self.items.read();
        items
            .get(index)
            .cloned()
            .ok_or(CollectionError::IndexOutOfRange {
                index: index as isize,
                len: items.len(),
            })
    }

    /// Returns `true` if `item` is a member of the sequence.
    pub fn contains(&self, item: &T) -> bool {
        self.items.read().contains(item)
    }

    /// Returns the index of the first item equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.read().iter().position(|x| x == item)
    }

    /// Read-only access to the items.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Clones the contents out as a plain vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }

    // -------------------------------------------------------------------------
    // Cursor surface
    // -------------------------------------------------------------------------

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
        let position = self.cursor.read().position;
        position == self.len() as isize
    }

    /// Moves the cursor to `position` without mutating storage.
    ///
    /// `position` must be in `[-1, len]`. A no-op move emits nothing. Returns
    /// `Ok(false)` when a `current_changing` handler vetoes the move.
    pub fn move_current_to_position(&self, position: isize) -> CollectionResult<bool> {
        let items = self.to_vec();
        cursor::move_to_position(&self.signals, &self.cursor, &items, position)
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
        if self.is_empty() {
            self.move_current_to_position(BEFORE_FIRST)
        } else {
            self.move_current_to_position(0)
        }
    }

    /// Moves the cursor onto the last item, or before-first when empty.
    pub fn move_current_to_last(&self) -> CollectionResult<bool> {
        let len = self.len();
        if len == 0 {
            self.move_current_to_position(BEFORE_FIRST)
        } else {
            self.move_current_to_position(len as isize - 1)
        }
    }

    /// Advances the cursor one position, saturating at after-last.
    pub fn move_current_to_next(&self) -> CollectionResult<bool> {
        let target = (self.current_position() + 1).min(self.len() as isize);
        self.move_current_to_position(target)
    }

    /// Backs the cursor up one position, saturating at before-first.
    pub fn move_current_to_previous(&self) -> CollectionResult<bool> {
        let target = (self.current_position() - 1).max(BEFORE_FIRST);
        self.move_current_to_position(target)
    }

    /// Recomputes cursor validity against the current contents.
    ///
    /// Useful after a partially failed [`clear`](Self::clear) left the cursor
    /// pointing at an item that is no longer a member.
    pub fn refresh(&self) {
        let items = self.to_vec();
        cursor::revalidate(&self.signals, &self.cursor, &items);
    }

    // -------------------------------------------------------------------------
    // Mutation surface
    // -------------------------------------------------------------------------

    /// Appends `item`, returning its index.
    pub fn add(&self, item: T) -> CollectionResult<usize> {
        let index = self.len();
        self.insert(index, item)?;
        Ok(index)
    }

    /// Inserts `item` at `index`, which must be in `0..=len`.
    pub fn insert(&self, index: usize, item: T) -> CollectionResult<()> {
        let len = self.len();
        if index > len {
            return Err(CollectionError::IndexOutOfRange {
                index: index as isize,
                len,
            });
        }
        tracing::trace!(target: "pergola::collection", index, "inserting item");

        let before = self.cursor_snapshot();
        self.items.write().insert(index, item.clone());
        transfer(self.host.as_ref(), Some(&item), None, || {
            self.items.write().remove(index);
        })?;

        {
            let mut state = self.cursor.write();
            state.position = cursor::position_after_insert(state.position, index);
        }
        let after = self.cursor_snapshot();
        cursor::emit_cursor_diff(&self.signals, &before, &after);

        self.signals.collection_changed.emit(CollectionChange::Add {
            items: vec![item],
            index,
        });
        self.emit_count();
        Ok(())
    }

    /// Removes and returns the item at `index`, which must be in `0..len`.
    ///
    /// Removing the current item raises exactly one changing/changed pair and
    /// lands the cursor on the item now occupying the position (or the new
    /// tail, or before-first when the view empties).
    pub fn remove_at(&self, index: usize) -> CollectionResult<T> {
        let len = self.len();
        if index >= len {
            return Err(CollectionError::IndexOutOfRange {
                index: index as isize,
                len,
            });
        }
        tracing::trace!(target: "pergola::collection", index, "removing item");

        let before = self.cursor_snapshot();
        let removed = self.items.write().remove(index);

        // Storage no longer references the item by the time the host is told.
        transfer(self.host.as_ref(), None, Some(&removed), || {})?;

        match cursor::position_after_remove(before.position, index, len - 1) {
            RemovalEffect::Unchanged => {}
            RemovalEffect::Shifted(position) => {
                self.cursor.write().position = position;
                let after = self.cursor_snapshot();
                cursor::emit_cursor_diff(&self.signals, &before, &after);
            }
            RemovalEffect::CurrentRemoved(position) => {
                let landing = usize::try_from(position)
                    .ok()
                    .and_then(|i| self.items.read().get(i).cloned());
                self.signals.emit_current_change(|| {
                    let mut state = self.cursor.write();
                    state.position = position;
                    state.item = landing;
                });
                let after = self.cursor_snapshot();
                cursor::emit_cursor_diff(&self.signals, &before, &after);
            }
        }

        self.signals
            .collection_changed
            .emit(CollectionChange::Remove {
                item: removed.clone(),
                index,
            });
        self.emit_count();
        Ok(removed)
    }

    /// Removes the first item equal to `item`.
    ///
    /// Returns `Ok(false)` without raising any event when no such member
    /// exists.
    pub fn remove(&self, item: &T) -> CollectionResult<bool> {
        match self.index_of(item) {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replaces the item at `index`, returning the previous occupant.
    ///
    /// The cursor position is unaffected; when the replaced slot is the
    /// current position, the current item follows the new value.
    pub fn set(&self, index: usize, item: T) -> CollectionResult<T> {
        let len = self.len();
        if index >= len {
            return Err(CollectionError::IndexOutOfRange {
                index: index as isize,
                len,
            });
        }

        let old = std::mem::replace(&mut self.items.write()[index], item.clone());
        let restore = old.clone();
        transfer(self.host.as_ref(), Some(&item), Some(&old), || {
            self.items.write()[index] = restore;
        })?;

        let before = self.cursor_snapshot();
        if before.position == index as isize {
            self.cursor.write().item = Some(item.clone());
            let after = self.cursor_snapshot();
            cursor::emit_cursor_diff(&self.signals, &before, &after);
        }

        self.signals
            .collection_changed
            .emit(CollectionChange::Replace {
                item,
                old_item: old.clone(),
                index,
            });
        Ok(old)
    }

    /// Empties the view and parks the cursor before the first item.
    ///
    /// With a host attached, items are released front to back and leave
    /// storage as they go; a failed release propagates with the remaining
    /// suffix still in place and no events raised. [`refresh`](Self::refresh)
    /// recovers the cursor afterwards.
    pub fn clear(&self) -> CollectionResult<()> {
        tracing::debug!(target: "pergola::collection", len = self.len(), "clearing view");

        let before = self.cursor_snapshot();
        if self.host.is_some() {
            while let Some(item) = self.take_first() {
                transfer(self.host.as_ref(), None, Some(&item), || {})?;
            }
        } else {
            self.items.write().clear();
        }

        // Currency only changes when the cursor was on an item; a sentinel
        // cursor resets silently, with property diffs alone.
        if before.item.is_some() {
            self.signals.emit_current_change(|| {
                *self.cursor.write() = CursorState::default();
            });
        } else {
            *self.cursor.write() = CursorState::default();
        }
        let after = self.cursor_snapshot();
        cursor::emit_cursor_diff(&self.signals, &before, &after);

        self.signals
            .collection_changed
            .emit(CollectionChange::Reset);
        self.emit_count();
        Ok(())
    }

    fn take_first(&self) -> Option<T> {
        let mut items = self.items.write();
        if items.is_empty() {
            None
        } else {
            Some(items.remove(0))
        }
    }

    fn cursor_snapshot(&self) -> cursor::CursorSnapshot<T> {
        let len = self.len();
        cursor::snapshot(&self.cursor.read(), len)
    }

    fn emit_count(&self) {
        if self.count.set(self.len()) {
            self.signals.property_changed.emit(ViewProperty::Count);
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Default for DirectView<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{RecordingHost, record_events};
    use super::*;

    fn view_abc() -> DirectView<String> {
        DirectView::from_items(vec!["A".into(), "B".into(), "C".into()])
    }

    #[test]
    fn test_add_to_empty_view() {
        // Scenario: adding to an empty view leaves the cursor parked.
        let view = DirectView::<String>::new();
        let log = record_events(view.signals());

        let index = view.add("x".to_string()).unwrap();

        assert_eq!(index, 0);
        assert_eq!(view.len(), 1);
        assert_eq!(view.index_of(&"x".to_string()), Some(0));
        assert_eq!(view.current_position(), BEFORE_FIRST);
        assert!(view.is_before_first());
        assert_eq!(*log.lock(), vec!["add:1@0", "prop:Count"]);
    }

    #[test]
    fn test_insert_bounds() {
        let view = view_abc();
        assert!(view.insert(3, "D".into()).is_ok());
        assert!(matches!(
            view.insert(5, "E".into()),
            Err(CollectionError::IndexOutOfRange { index: 5, len: 4 })
        ));
        assert!(matches!(
            view.remove_at(4),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            view.get(4),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            view.set(4, "E".into()),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
        // Nothing was disturbed by the rejected calls.
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_insert_before_cursor_shifts_position() {
        let view = view_abc();
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        view.insert(0, "Z".into()).unwrap();

        assert_eq!(view.current_position(), 2);
        assert_eq!(view.current_item(), Some("B".to_string()));
        // Position notification only; no current_changed.
        assert_eq!(
            *log.lock(),
            vec!["prop:CurrentPosition", "add:1@0", "prop:Count"]
        );
    }

    #[test]
    fn test_insert_after_cursor_leaves_position() {
        let view = view_abc();
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        view.insert(2, "Z".into()).unwrap();

        assert_eq!(view.current_position(), 1);
        assert_eq!(*log.lock(), vec!["add:1@2", "prop:Count"]);
    }

    #[test]
    fn test_remove_before_cursor_shifts_position() {
        // Scenario: [A, B], cursor on B; removing A keeps currency on B.
        let view = DirectView::from_items(vec!["A".to_string(), "B".to_string()]);
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        view.remove_at(0).unwrap();

        assert_eq!(view.current_position(), 0);
        assert_eq!(view.current_item(), Some("B".to_string()));
        assert_eq!(
            *log.lock(),
            vec!["prop:CurrentPosition", "remove:A@0", "prop:Count"]
        );
    }

    #[test]
    fn test_remove_at_cursor_moves_currency() {
        // Scenario: [A, B, C], cursor on B; removing B lands on C.
        let view = view_abc();
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        view.remove_at(1).unwrap();

        assert_eq!(view.to_vec(), vec!["A".to_string(), "C".to_string()]);
        assert_eq!(view.current_position(), 1);
        assert_eq!(view.current_item(), Some("C".to_string()));
        // Exactly one changing/changed pair; the position did not move, so
        // only the current item notification accompanies it.
        assert_eq!(
            *log.lock(),
            vec![
                "changing",
                "changed",
                "prop:CurrentItem",
                "remove:B@1",
                "prop:Count"
            ]
        );
    }

    #[test]
    fn test_remove_only_item_empties_cursor() {
        let view = DirectView::from_items(vec!["A".to_string()]);
        view.move_current_to_position(0).unwrap();
        let log = record_events(view.signals());

        view.remove_at(0).unwrap();

        assert_eq!(view.current_position(), BEFORE_FIRST);
        assert_eq!(view.current_item(), None);
        assert_eq!(
            *log.lock(),
            vec![
                "changing",
                "changed",
                "prop:CurrentPosition",
                "prop:CurrentItem",
                "prop:IsBeforeFirst",
                "remove:A@0",
                "prop:Count"
            ]
        );
    }

    #[test]
    fn test_remove_missing_item_is_silent() {
        let view = view_abc();
        let log = record_events(view.signals());

        assert!(!view.remove(&"Z".to_string()).unwrap());
        assert_eq!(view.len(), 3);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_remove_by_value() {
        let view = view_abc();
        assert!(view.remove(&"B".to_string()).unwrap());
        assert_eq!(view.to_vec(), vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_rejected_insert_rolls_back() {
        // Scenario: a host that always rejects leaves the view untouched.
        let host = Arc::new(RecordingHost::rejecting());
        let view = DirectView::<String>::with_host(host);
        let log = record_events(view.signals());

        let result = view.insert(0, "X".into());

        assert!(matches!(
            result,
            Err(CollectionError::OwnershipRejected { .. })
        ));
        assert_eq!(view.len(), 0);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_rejected_replace_restores_slot() {
        let host = Arc::new(RecordingHost::default());
        let view = DirectView::<String>::with_host(host.clone());
        view.add("A".into()).unwrap();
        view.add("B".into()).unwrap();

        host.reject_adopts();
        let log = record_events(view.signals());
        let result = view.set(1, "Z".into());

        assert!(matches!(
            result,
            Err(CollectionError::OwnershipRejected { .. })
        ));
        assert_eq!(view.to_vec(), vec!["A".to_string(), "B".to_string()]);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_replace_hands_off_both_sides() {
        let host = Arc::new(RecordingHost::default());
        let view = DirectView::<String>::with_host(host.clone());
        view.add("A".into()).unwrap();

        view.set(0, "B".into()).unwrap();

        assert_eq!(*host.adopted.lock(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(*host.released.lock(), vec!["A".to_string()]);
    }

    #[test]
    fn test_replace_release_failure_keeps_new_value() {
        // The asymmetric guarantee: the new item stays once adopted.
        let host = Arc::new(RecordingHost::default());
        let view = DirectView::<String>::with_host(host.clone());
        view.add("A".into()).unwrap();

        host.fail_release_of("A");
        let result = view.set(0, "B".into());

        assert!(matches!(
            result,
            Err(CollectionError::OwnershipReleaseFailed { .. })
        ));
        assert_eq!(view.to_vec(), vec!["B".to_string()]);
    }

    #[test]
    fn test_replace_at_cursor_updates_current_item() {
        let view = view_abc();
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        view.set(1, "Z".into()).unwrap();

        assert_eq!(view.current_position(), 1);
        assert_eq!(view.current_item(), Some("Z".to_string()));
        // No changing/changed pair: the position did not move.
        assert_eq!(*log.lock(), vec!["prop:CurrentItem", "replace:B->Z@1"]);
    }

    #[test]
    fn test_clear_releases_in_order() {
        let host = Arc::new(RecordingHost::default());
        let view = DirectView::<String>::with_host(host.clone());
        view.add("A".into()).unwrap();
        view.add("B".into()).unwrap();
        view.add("C".into()).unwrap();
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        view.clear().unwrap();

        assert_eq!(view.len(), 0);
        assert_eq!(view.current_position(), BEFORE_FIRST);
        assert_eq!(
            *host.released.lock(),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
        assert_eq!(
            *log.lock(),
            vec![
                "changing",
                "changed",
                "prop:CurrentPosition",
                "prop:CurrentItem",
                "prop:IsBeforeFirst",
                "reset",
                "prop:Count"
            ]
        );
    }

    #[test]
    fn test_clear_with_sentinel_cursor_resets_silently() {
        // Position 0 on an empty view is the other "no current item"
        // sentinel; clearing must not pretend currency changed.
        let view = DirectView::<String>::new();
        view.move_current_to_position(0).unwrap();
        let log = record_events(view.signals());

        view.clear().unwrap();

        assert_eq!(view.current_position(), BEFORE_FIRST);
        assert_eq!(
            *log.lock(),
            vec![
                "prop:CurrentPosition",
                "prop:IsBeforeFirst",
                "prop:IsAfterLast",
                "reset"
            ]
        );
    }

    #[test]
    fn test_clear_with_after_last_cursor_skips_current_events() {
        let view = view_abc();
        view.move_current_to_position(3).unwrap();
        let log = record_events(view.signals());

        view.clear().unwrap();

        assert_eq!(view.current_position(), BEFORE_FIRST);
        assert_eq!(
            *log.lock(),
            vec![
                "prop:CurrentPosition",
                "prop:IsBeforeFirst",
                "prop:IsAfterLast",
                "reset",
                "prop:Count"
            ]
        );
    }

    #[test]
    fn test_clear_without_cursor_skips_current_events() {
        let view = view_abc();
        let log = record_events(view.signals());

        view.clear().unwrap();

        assert_eq!(*log.lock(), vec!["reset", "prop:Count"]);
    }

    #[test]
    fn test_clear_release_failure_keeps_suffix() {
        let host = Arc::new(RecordingHost::default());
        let view = DirectView::<String>::with_host(host.clone());
        view.add("A".into()).unwrap();
        view.add("B".into()).unwrap();
        view.add("C".into()).unwrap();
        view.move_current_to_position(0).unwrap();

        host.fail_release_of("B");
        let result = view.clear();

        assert!(matches!(
            result,
            Err(CollectionError::OwnershipReleaseFailed { .. })
        ));
        // A was released and cleared; B failed mid-release and is gone from
        // storage; C never got touched.
        assert_eq!(view.to_vec(), vec!["C".to_string()]);
        assert_eq!(*host.released.lock(), vec!["A".to_string()]);

        // The cursor still claims item A; refresh treats that as a reset.
        let log = record_events(view.signals());
        view.refresh();
        assert_eq!(view.current_position(), 0);
        assert_eq!(view.current_item(), Some("C".to_string()));
        assert_eq!(
            *log.lock(),
            vec!["changing", "changed", "prop:CurrentItem", "reset"]
        );
    }

    #[test]
    fn test_move_current_veto_leaves_cursor() {
        let view = view_abc();
        view.signals().current_changing.connect(|args| args.cancel());
        let moved = view.move_current_to_position(2).unwrap();

        assert!(!moved);
        assert_eq!(view.current_position(), BEFORE_FIRST);
    }

    #[test]
    fn test_noop_move_emits_nothing() {
        let view = view_abc();
        view.move_current_to_position(1).unwrap();
        let log = record_events(view.signals());

        assert!(view.move_current_to_position(1).unwrap());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_move_bounds() {
        let view = view_abc();
        assert!(view.move_current_to_position(3).unwrap()); // after-last ok
        assert!(view.is_after_last());
        assert!(matches!(
            view.move_current_to_position(4),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            view.move_current_to_position(-2),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_move_current_to_missing_parks_before_first() {
        let view = view_abc();
        view.move_current_to_position(2).unwrap();

        view.move_current_to(&"Z".to_string()).unwrap();

        assert_eq!(view.current_position(), BEFORE_FIRST);
        assert_eq!(view.current_item(), None);
    }

    #[test]
    fn test_derived_moves() {
        let view = view_abc();

        view.move_current_to_first().unwrap();
        assert_eq!(view.current_position(), 0);

        view.move_current_to_next().unwrap();
        assert_eq!(view.current_position(), 1);

        view.move_current_to_last().unwrap();
        assert_eq!(view.current_position(), 2);

        view.move_current_to_next().unwrap();
        assert!(view.is_after_last());

        // Saturates at after-last.
        view.move_current_to_next().unwrap();
        assert_eq!(view.current_position(), 3);

        view.move_current_to_previous().unwrap();
        assert_eq!(view.current_position(), 2);
    }

    #[test]
    fn test_move_property_notifications() {
        let view = view_abc();
        let log = record_events(view.signals());

        view.move_current_to_position(0).unwrap();

        assert_eq!(
            *log.lock(),
            vec![
                "changing",
                "changed",
                "prop:CurrentPosition",
                "prop:CurrentItem",
                "prop:IsBeforeFirst"
            ]
        );
    }
}
