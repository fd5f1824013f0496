//! An observable, index-addressable collection with a current-item cursor.
//!
//! The centerpiece is [`ItemCollection`], a facade over one of two backing
//! modes: [`DirectView`] owns its contents and exposes the full mutation
//! surface, while [`SourceView`] is a read-only snapshot handed in by an
//! external source. Observers subscribe to the facade's [`ViewSignals`] once;
//! the subscription keeps working across a source swap.
//!
//! Both modes share the same cursor semantics: a position in `[-1, len]`
//! where `-1` ([`BEFORE_FIRST`]) and `len` are the off-the-ends sentinels,
//! cursor moves raise a `current_changing`/`current_changed` pair, and
//! explicit moves can be vetoed from a `current_changing` handler.
//!
//! Direct-mode contents can be tied to an [`ItemHost`], a composite that
//! takes logical ownership of items while they are members. A host that
//! rejects an incoming item rolls the mutation back; see [`ItemHost`] for the
//! exact contract.
//!
//! All notification is synchronous and the collection expects single-threaded
//! use; handlers run on the mutating call's stack.

mod cursor;
mod direct_view;
mod error;
mod events;
mod facade;
mod ownership;
mod source_view;

pub use cursor::BEFORE_FIRST;
pub use direct_view::DirectView;
pub use error::{CollectionError, CollectionResult};
pub use events::{CollectionChange, CurrentChanging, ViewProperty, ViewSignals};
pub use facade::{ItemCollection, ViewMode};
pub use ownership::{HostError, ItemHost};
pub use source_view::SourceView;

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for the collection test modules.

    use std::fmt::Display;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::Mutex;

    use super::events::{CollectionChange, ViewSignals};
    use super::ownership::{HostError, ItemHost};

    /// A host that records every hand-off and can be told to misbehave.
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        pub adopted: Mutex<Vec<String>>,
        pub released: Mutex<Vec<String>>,
        reject_adopt: AtomicBool,
        fail_release: Mutex<Option<String>>,
    }

    impl RecordingHost {
        /// A host that rejects every adoption.
        pub fn rejecting() -> Self {
            let host = Self::default();
            host.reject_adopt.store(true, Ordering::SeqCst);
            host
        }

        /// Reject adoptions from now on.
        pub fn reject_adopts(&self) {
            self.reject_adopt.store(true, Ordering::SeqCst);
        }

        /// Fail the release of exactly `item`.
        pub fn fail_release_of(&self, item: &str) {
            *self.fail_release.lock() = Some(item.to_string());
        }
    }

    impl ItemHost<String> for RecordingHost {
        fn adopt(&self, item: &String) -> Result<(), HostError> {
            if self.reject_adopt.load(Ordering::SeqCst) {
                return Err(HostError::new(format!("host refused {item}")));
            }
            self.adopted.lock().push(item.clone());
            Ok(())
        }

        fn release(&self, item: &String) -> Result<(), HostError> {
            if self.fail_release.lock().as_deref() == Some(item.as_str()) {
                return Err(HostError::new(format!("cannot release {item}")));
            }
            self.released.lock().push(item.clone());
            Ok(())
        }
    }

    /// Subscribes to every channel of `signals` and returns the shared log
    /// the handlers append to, in emission order.
    pub(crate) fn record_events<T>(signals: &Arc<ViewSignals<T>>) -> Arc<Mutex<Vec<String>>>
    where
        T: Display + Clone + Send + Sync + 'static,
    {
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = log.clone();
        signals
            .property_changed
            .connect(move |p| l.lock().push(format!("prop:{p:?}")));

        let l = log.clone();
        signals.collection_changed.connect(move |change| {
            let entry = match change {
                CollectionChange::Add { items, index } => {
                    format!("add:{}@{index}", items.len())
                }
                CollectionChange::Remove { item, index } => format!("remove:{item}@{index}"),
                CollectionChange::Replace {
                    item,
                    old_item,
                    index,
                } => format!("replace:{old_item}->{item}@{index}"),
                CollectionChange::Reset => "reset".to_string(),
            };
            l.lock().push(entry);
        });

        let l = log.clone();
        signals
            .current_changing
            .connect(move |_| l.lock().push("changing".to_string()));

        let l = log.clone();
        signals
            .current_changed
            .connect(move |_| l.lock().push("changed".to_string()));

        log
    }
}
