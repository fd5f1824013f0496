//! The stable collection handle that owners hand to observers.

use std::sync::Arc;

use parking_lot::RwLock;

use super::cursor::{self, BEFORE_FIRST};
use super::direct_view::DirectView;
use super::error::{CollectionError, CollectionResult};
use super::events::{CollectionChange, ViewProperty, ViewSignals};
use super::ownership::ItemHost;
use super::source_view::SourceView;

/// Which backing mode an [`ItemCollection`] is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Contents are owned by the collection and mutable through its API.
    Direct,
    /// Contents were handed in by an external source; list mutation is
    /// unsupported.
    Sourced,
}

/// The active backing view behind a facade.
enum Backing<T> {
    Direct(DirectView<T>),
    Source(SourceView<T>),
}

/// An index-addressable collection with a current-item cursor, observable
/// through one stable set of signals no matter which backing mode is active.
///
/// A collection starts in [`ViewMode::Direct`]: it owns its contents and the
/// full mutation surface is available. Installing an external source with
/// [`set_source`](Self::set_source) switches it to [`ViewMode::Sourced`],
/// where the contents are a read-only snapshot and list mutators report
/// [`CollectionError::UnsupportedOperation`]. Cursor movement works the same
/// way in both modes.
///
/// Observers subscribe once, to [`signals`](Self::signals); the facade
/// re-publishes the active backing view's events under those channels, so a
/// source swap never invalidates a subscription.
///
/// # Example
///
/// ```
/// use pergola::collection::{CollectionChange, ItemCollection};
///
/// let collection = ItemCollection::new();
/// collection.signals().collection_changed.connect(|change| {
///     if let CollectionChange::Add { index, .. } = change {
///         println!("added at {index}");
///     }
/// });
///
/// collection.add(42).unwrap();
/// collection.set_source([1, 2, 3]).unwrap();
/// assert!(collection.add(4).is_err());
/// ```
pub struct ItemCollection<T> {
    backing: RwLock<Backing<T>>,
    signals: Arc<ViewSignals<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ItemCollection<T> {
    /// Creates an empty collection in direct mode with no host.
    pub fn new() -> Self {
        Self::from_backing(Backing::Direct(DirectView::new()))
    }

    /// Creates an empty direct-mode collection whose items are offered to
    /// `host` as they come and go.
    pub fn with_host(host: Arc<dyn ItemHost<T>>) -> Self {
        Self::from_backing(Backing::Direct(DirectView::with_host(host)))
    }

    /// Creates a direct-mode collection over `items`, without offering them
    /// to any host.
    pub fn from_items(items: Vec<T>) -> Self {
        Self::from_backing(Backing::Direct(DirectView::from_items(items)))
    }

    fn from_backing(backing: Backing<T>) -> Self {
        let signals = Arc::new(ViewSignals::new());
        match &backing {
            Backing::Direct(view) => Self::forward(&signals, view.signals()),
            Backing::Source(view) => Self::forward(&signals, view.signals()),
        }
        Self {
            backing: RwLock::new(backing),
            signals,
        }
    }

    /// Re-publish everything `source` emits on the facade's own channels.
    ///
    /// The connections live inside the backing view's signals, so they die
    /// with the view when a source swap drops it.
    fn forward(own: &Arc<ViewSignals<T>>, source: &ViewSignals<T>) {
        let sink = own.clone();
        source.property_changed.connect(move |p| sink.property_changed.emit(*p));
        let sink = own.clone();
        source
            .collection_changed
            .connect(move |c| sink.collection_changed.emit(c.clone()));
        // The forwarded clone shares the payload's cancel flag, so a facade
        // subscriber can veto a backing-view cursor move.
        let sink = own.clone();
        source
            .current_changing
            .connect(move |args| sink.current_changing.emit(args.clone()));
        let sink = own.clone();
        source.current_changed.connect(move |_| sink.current_changed.emit(()));
    }

    /// The collection's stable signals. Subscriptions survive source swaps.
    pub fn signals(&self) -> &Arc<ViewSignals<T>> {
        &self.signals
    }

    /// The active backing mode.
    pub fn mode(&self) -> ViewMode {
        match &*self.backing.read_recursive() {
            Backing::Direct(_) => ViewMode::Direct,
            Backing::Source(_) => ViewMode::Sourced,
        }
    }

    /// Whether the contents come from an external source.
    pub fn is_sourced(&self) -> bool {
        self.mode() == ViewMode::Sourced
    }

    // -------------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------------

    /// Returns the number of items in the collection.
    pub fn len(&self) -> usize {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.len(),
            Backing::Source(view) => view.len(),
        }
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> CollectionResult<T> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.get(index),
            Backing::Source(view) => view.get(index),
        }
    }

    /// Returns `true` if `item` is a member of the collection.
    pub fn contains(&self, item: &T) -> bool {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.contains(item),
            Backing::Source(view) => view.contains(item),
        }
    }

    /// Returns the index of the first item equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.index_of(item),
            Backing::Source(view) => view.index_of(item),
        }
    }

    /// Clones the contents out as a plain vector.
    pub fn to_vec(&self) -> Vec<T> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.to_vec(),
            Backing::Source(view) => view.to_vec(),
        }
    }

    // -------------------------------------------------------------------------
    // Cursor surface
    // -------------------------------------------------------------------------

    /// The item under the cursor, if the cursor is on one.
    pub fn current_item(&self) -> Option<T> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.current_item(),
            Backing::Source(view) => view.current_item(),
        }
    }

    /// The cursor position, in `[-1, len]`.
    pub fn current_position(&self) -> isize {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.current_position(),
            Backing::Source(view) => view.current_position(),
        }
    }

    /// Whether the cursor sits before the first item.
    pub fn is_before_first(&self) -> bool {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.is_before_first(),
            Backing::Source(view) => view.is_before_first(),
        }
    }

    /// Whether the cursor sits past the last item.
    pub fn is_after_last(&self) -> bool {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.is_after_last(),
            Backing::Source(view) => view.is_after_last(),
        }
    }

    /// Moves the cursor to `position`, which must be in `[-1, len]`.
    ///
    /// Returns `Ok(false)` when a `current_changing` handler vetoes the move.
    pub fn move_current_to_position(&self, position: isize) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.move_current_to_position(position),
            Backing::Source(view) => view.move_current_to_position(position),
        }
    }

    /// Moves the cursor onto the first item equal to `item`, or before the
    /// first item when no such member exists.
    pub fn move_current_to(&self, item: &T) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.move_current_to(item),
            Backing::Source(view) => view.move_current_to(item),
        }
    }

    /// Moves the cursor onto the first item, or before-first when empty.
    pub fn move_current_to_first(&self) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.move_current_to_first(),
            Backing::Source(view) => view.move_current_to_first(),
        }
    }

    /// Moves the cursor onto the last item, or before-first when empty.
    pub fn move_current_to_last(&self) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.move_current_to_last(),
            Backing::Source(view) => view.move_current_to_last(),
        }
    }

    /// Advances the cursor one position, saturating at after-last.
    pub fn move_current_to_next(&self) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.move_current_to_next(),
            Backing::Source(view) => view.move_current_to_next(),
        }
    }

    /// Backs the cursor up one position, saturating at before-first.
    pub fn move_current_to_previous(&self) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.move_current_to_previous(),
            Backing::Source(view) => view.move_current_to_previous(),
        }
    }

    /// Recomputes cursor validity against the current contents.
    pub fn refresh(&self) {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.refresh(),
            Backing::Source(view) => view.refresh(),
        }
    }

    // -------------------------------------------------------------------------
    // Mutation surface (direct mode only)
    // -------------------------------------------------------------------------

    /// Appends `item`, returning its index.
    pub fn add(&self, item: T) -> CollectionResult<usize> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.add(item),
            Backing::Source(_) => Err(CollectionError::UnsupportedOperation),
        }
    }

    /// Inserts `item` at `index`, which must be in `0..=len`.
    pub fn insert(&self, index: usize, item: T) -> CollectionResult<()> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.insert(index, item),
            Backing::Source(_) => Err(CollectionError::UnsupportedOperation),
        }
    }

    /// Removes and returns the item at `index`, which must be in `0..len`.
    pub fn remove_at(&self, index: usize) -> CollectionResult<T> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.remove_at(index),
            Backing::Source(_) => Err(CollectionError::UnsupportedOperation),
        }
    }

    /// Removes the first item equal to `item`; `Ok(false)` when absent.
    pub fn remove(&self, item: &T) -> CollectionResult<bool> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.remove(item),
            Backing::Source(_) => Err(CollectionError::UnsupportedOperation),
        }
    }

    /// Replaces the item at `index`, returning the previous occupant.
    pub fn set(&self, index: usize, item: T) -> CollectionResult<T> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.set(index, item),
            Backing::Source(_) => Err(CollectionError::UnsupportedOperation),
        }
    }

    /// Empties the collection and parks the cursor before the first item.
    pub fn clear(&self) -> CollectionResult<()> {
        match &*self.backing.read_recursive() {
            Backing::Direct(view) => view.clear(),
            Backing::Source(_) => Err(CollectionError::UnsupportedOperation),
        }
    }

    // -------------------------------------------------------------------------
    // Backing mode
    // -------------------------------------------------------------------------

    /// Hands the collection's contents over to an external source.
    ///
    /// Switches the collection to [`ViewMode::Sourced`] over a snapshot of
    /// `source`; the switch is one-way. Items still held in direct mode are
    /// cleared first, releasing each to the host; a failed release aborts the
    /// swap. Observers see a non-cancelable changing/changed pair around the
    /// swap, then a [`CollectionChange::Reset`], then a single
    /// [`CollectionChange::Add`] carrying the entire new contents when it is
    /// non-empty, then a `Count` notification. The cursor parks before the
    /// first item.
    pub fn set_source(&self, source: impl IntoIterator<Item = T>) -> CollectionResult<()> {
        {
            let backing = self.backing.read_recursive();
            if let Backing::Direct(view) = &*backing {
                if !view.is_empty() {
                    view.clear()?;
                }
            }
        }
        tracing::debug!(target: "pergola::collection", "installing external source");
        self.install(SourceView::new(source));
        Ok(())
    }

    /// Detaches the external source, leaving an empty sourced collection.
    ///
    /// A no-op in direct mode: there is nothing to detach.
    pub fn clear_source(&self) {
        if !self.is_sourced() {
            return;
        }
        tracing::debug!(target: "pergola::collection", "detaching external source");
        self.install(SourceView::empty());
    }

    fn install(&self, view: SourceView<T>) {
        Self::forward(&self.signals, view.signals());
        let contents = view.to_vec();

        let before = cursor::CursorSnapshot {
            position: self.current_position(),
            item: self.current_item(),
            before_first: self.is_before_first(),
            after_last: self.is_after_last(),
        };
        self.signals.emit_current_change(|| {
            *self.backing.write() = Backing::Source(view);
        });

        let after = cursor::CursorSnapshot {
            position: BEFORE_FIRST,
            item: None,
            before_first: true,
            after_last: false,
        };
        cursor::emit_cursor_diff(&self.signals, &before, &after);

        self.signals
            .collection_changed
            .emit(CollectionChange::Reset);
        if !contents.is_empty() {
            self.signals.collection_changed.emit(CollectionChange::Add {
                items: contents,
                index: 0,
            });
        }
        // A swap always ends with a Count notification, even between sources
        // of equal length: the membership changed wholesale.
        self.signals.property_changed.emit(ViewProperty::Count);
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Default for ItemCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
