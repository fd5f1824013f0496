//! Core systems for Pergola.
//!
//! This crate provides the foundational components of the Pergola collection
//! toolkit:
//!
//! - **Signal/Slot System**: Type-safe, synchronous inter-object communication
//! - **Property System**: Reactive values with change detection
//!
//! Dispatch is deliberately synchronous and single-threaded in spirit: every
//! signal emission runs its slots to completion on the emitting thread. There
//! is no event loop and no queued delivery.
//!
//! # Signal/Slot Example
//!
//! ```
//! use pergola_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Logging
//!
//! Pergola instruments itself with the `tracing` crate. Install a subscriber
//! (for example `tracing_subscriber::fmt::init()`) to see output; the
//! `pergola_core::signal` target filters signal dispatch traces.

pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
