//! Input routing and gesture arbitration for Nux.
//!
//! This crate decides where input goes:
//!
//! - [`input`]: per-window routing of mouse, keyboard and drag-and-drop
//!   events to input areas, with mouse focus, keyboard focus, grabs,
//!   modal windows and exclusive input mode
//! - [`gesture`]: arbitration of competing multitouch gestures over shared
//!   targets
//!
//! Everything here runs on the window's dispatch thread. Objects are
//! addressed by [`ObjectId`] handles that may outlive what they point to;
//! every use checks that the object is still alive.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod input;

pub use config::InputConfig;
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use input::{InputArea, InputEvent, WindowCompositor};
pub use nux_core::{ObjectId, Signal};

static_assertions::assert_impl_all!(gesture::GestureEvent: Send, Sync, Clone);
static_assertions::assert_impl_all!(input::AreaSignals: Send, Sync);
static_assertions::assert_not_impl_any!(WindowCompositor: Send);
