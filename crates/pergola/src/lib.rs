//! Observable item collections with a current-item cursor.
//!
//! `pergola` provides [`ItemCollection`], a dual-mode collection for building
//! list-shaped UI state: an ordered, index-addressable sequence, a cursor
//! designating the current item, and synchronous change notification through
//! [`pergola_core::Signal`] channels.
//!
//! A collection starts out owning its contents (direct mode) and can be
//! switched, one-way, to viewing a snapshot handed in by an external source
//! (sourced mode). Observers never care which mode is active: the facade
//! re-publishes the active backing view's events on one stable set of
//! channels.
//!
//! ```
//! use pergola::{ItemCollection, ViewProperty};
//!
//! let tabs = ItemCollection::new();
//! tabs.signals().property_changed.connect(|p| {
//!     if *p == ViewProperty::CurrentItem {
//!         println!("selection changed");
//!     }
//! });
//!
//! tabs.add("Home".to_string()).unwrap();
//! tabs.add("Settings".to_string()).unwrap();
//! tabs.move_current_to_first().unwrap();
//! assert_eq!(tabs.current_item(), Some("Home".to_string()));
//! ```

pub mod collection;

pub use collection::{
    BEFORE_FIRST, CollectionChange, CollectionError, CollectionResult, CurrentChanging,
    DirectView, HostError, ItemCollection, ItemHost, SourceView, ViewMode, ViewProperty,
    ViewSignals,
};
