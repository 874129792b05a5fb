//! Core systems for Nux.
//!
//! This crate provides the foundational pieces the input core is built on:
//!
//! - **Object Model**: generation-checked handles, parent-child trees, names
//! - **Signal/Slot System**: typed observer lists for widget notifications
//! - **Poll Sources**: ready-to-read sources driven by the event loop
//! - **Thread Affinity**: checks for single-threaded state
//!
//! # Signal/Slot Example
//!
//! ```
//! use nux_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Handles
//!
//! ```
//! use nux_core::ObjectRegistry;
//!
//! let mut areas = ObjectRegistry::new();
//! let window = areas.insert("window");
//! let button = areas.insert_child(window, "button").unwrap();
//!
//! areas.destroy(window).unwrap();
//! // Handles to destroyed objects never resolve again.
//! assert!(areas.get(button).is_none());
//! ```

pub mod logging;
pub mod object;
pub mod signal;
pub mod source;
pub mod thread_check;

pub use logging::{RegistryTreeDebug, TreeFormatOptions, TreeStyle};
pub use object::{ObjectError, ObjectId, ObjectRegistry, ObjectResult};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use source::{PollSource, SourceControl, SourceId, SourceRegistry};
pub use thread_check::ThreadAffinity;
