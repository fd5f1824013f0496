//! Cursor positioning rules.
//!
//! The arithmetic that keeps the cursor consistent across structural changes
//! lives here as pure functions, separately testable from any storage. The
//! shared move/revalidate routines build on them and are used by both backing
//! modes.
//!
//! The cursor is an `isize` position in the closed range `[-1, len]`:
//! `-1` is the before-first sentinel, `len` the after-last sentinel, and
//! exactly one of {before-first, on-an-item, after-last} holds at all times.
//! An empty sequence admits positions `{-1, 0}`, both denoting "no current
//! item".

use parking_lot::RwLock;

use super::error::{CollectionError, CollectionResult};
use super::events::{CollectionChange, ViewProperty, ViewSignals};

/// Sentinel cursor position before the first item.
pub const BEFORE_FIRST: isize = -1;

/// The cursor: a position plus the cached item it pointed at.
///
/// The cache is what lets `refresh` detect that the sequence moved underneath
/// the cursor.
#[derive(Debug, Clone)]
pub(crate) struct CursorState<T> {
    pub position: isize,
    pub item: Option<T>,
}

impl<T> Default for CursorState<T> {
    fn default() -> Self {
        Self {
            position: BEFORE_FIRST,
            item: None,
        }
    }
}

/// Cursor position after an insert at `insert_index`.
///
/// Inserting at or before the cursor shifts it forward; the current item is
/// unchanged either way.
pub(crate) fn position_after_insert(old: isize, insert_index: usize) -> isize {
    if insert_index as isize <= old { old + 1 } else { old }
}

/// How a removal affects the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RemovalEffect {
    /// Removal happened past the cursor; nothing to do.
    Unchanged,
    /// Removal happened before the cursor; same item, lower position.
    Shifted(isize),
    /// The current item itself was removed. Currency lands at the given
    /// position and the changing/changed pair must be raised.
    CurrentRemoved(isize),
}

/// Cursor effect of removing the item at `removed_index`, where `new_len` is
/// the sequence length after the removal.
pub(crate) fn position_after_remove(
    old: isize,
    removed_index: usize,
    new_len: usize,
) -> RemovalEffect {
    let removed = removed_index as isize;
    if removed < old {
        RemovalEffect::Shifted(old - 1)
    } else if removed == old {
        let landing = if new_len > 0 {
            old.min(new_len as isize - 1)
        } else {
            BEFORE_FIRST
        };
        RemovalEffect::CurrentRemoved(landing)
    } else {
        RemovalEffect::Unchanged
    }
}

/// Observable cursor facts at one instant, used to diff property
/// notifications.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CursorSnapshot<T> {
    pub position: isize,
    pub item: Option<T>,
    pub before_first: bool,
    pub after_last: bool,
}

pub(crate) fn snapshot<T: Clone>(cursor: &CursorState<T>, len: usize) -> CursorSnapshot<T> {
    CursorSnapshot {
        position: cursor.position,
        item: cursor.item.clone(),
        before_first: cursor.position == BEFORE_FIRST,
        after_last: cursor.position == len as isize,
    }
}

/// Emit a property notification for each observable cursor fact that changed
/// between the two snapshots.
pub(crate) fn emit_cursor_diff<T: Clone + PartialEq>(
    signals: &ViewSignals<T>,
    before: &CursorSnapshot<T>,
    after: &CursorSnapshot<T>,
) {
    if before.position != after.position {
        signals.property_changed.emit(ViewProperty::CurrentPosition);
    }
    if before.item != after.item {
        signals.property_changed.emit(ViewProperty::CurrentItem);
    }
    if before.before_first != after.before_first {
        signals.property_changed.emit(ViewProperty::IsBeforeFirst);
    }
    if before.after_last != after.after_last {
        signals.property_changed.emit(ViewProperty::IsAfterLast);
    }
}

/// Re-address the cursor over `items` without mutating storage.
///
/// A no-op move (target equals the current position) emits nothing. Returns
/// `Ok(false)` when a `current_changing` handler vetoes the move; the cursor
/// is untouched in that case.
pub(crate) fn move_to_position<T: Clone + PartialEq>(
    signals: &ViewSignals<T>,
    cursor: &RwLock<CursorState<T>>,
    items: &[T],
    target: isize,
) -> CollectionResult<bool> {
    let len = items.len();
    if target < BEFORE_FIRST || target > len as isize {
        return Err(CollectionError::IndexOutOfRange { index: target, len });
    }

    let before = snapshot(&cursor.read(), len);
    if target == before.position {
        return Ok(true);
    }

    tracing::trace!(
        target: "pergola::collection",
        from = before.position,
        to = target,
        "moving cursor"
    );

    let moved = signals.try_emit_current_change(|| {
        let mut state = cursor.write();
        state.position = target;
        state.item = usize::try_from(target)
            .ok()
            .and_then(|i| items.get(i).cloned());
    });
    if !moved {
        return Ok(false);
    }

    let after = snapshot(&cursor.read(), len);
    emit_cursor_diff(signals, &before, &after);
    Ok(true)
}

/// Recompute cursor validity against the present contents.
///
/// If the cached current item still exists the position silently follows it
/// (position property notification only). If it vanished, the change is
/// structural: the changing/changed pair fires, the position clamps to the
/// nearest valid index (`-1` when the sequence is empty), and a `Reset`
/// collection change is raised.
pub(crate) fn revalidate<T: Clone + PartialEq>(
    signals: &ViewSignals<T>,
    cursor: &RwLock<CursorState<T>>,
    items: &[T],
) {
    let len = items.len();
    let before = snapshot(&cursor.read(), len);

    match &before.item {
        None => {
            // A sentinel cursor stays valid as long as it is still in range.
            if before.position == BEFORE_FIRST || before.position == len as isize {
                return;
            }
        }
        Some(item) => {
            if let Some(found) = items.iter().position(|x| x == item) {
                if found as isize != before.position {
                    cursor.write().position = found as isize;
                    let after = snapshot(&cursor.read(), len);
                    emit_cursor_diff(signals, &before, &after);
                }
                return;
            }
        }
    }

    tracing::debug!(
        target: "pergola::collection",
        position = before.position,
        "current item vanished, revalidating cursor"
    );

    let landing = if len == 0 {
        BEFORE_FIRST
    } else {
        before.position.clamp(0, len as isize - 1)
    };
    signals.emit_current_change(|| {
        let mut state = cursor.write();
        state.position = landing;
        state.item = usize::try_from(landing)
            .ok()
            .and_then(|i| items.get(i).cloned());
    });
    let after = snapshot(&cursor.read(), len);
    emit_cursor_diff(signals, &before, &after);
    signals.collection_changed.emit(CollectionChange::Reset);
}
