//! Mouse, keyboard and drag-and-drop routing.
//!
//! Platform events are handed to a [`WindowCompositor`], which decides which
//! [`InputArea`]s see them. Each area runs its own small state machine and
//! reports what happened through [`AreaSignals`].

mod area;
mod click;
mod compositor;
mod event;
mod grab;
mod processor;
mod routing;

pub use area::{
    AreaKind, AreaSignals, DndArgs, DndPlatform, InputArea, KeyArgs, MotionArgs, MouseArgs,
    NoDndPlatform, WheelArgs,
};
pub use click::ClickTracker;
pub use compositor::{AreaDestroyer, WindowCompositor};
pub use event::{
    EventKind, InputEvent, KeyboardModifiers, MouseButton, MouseButtons, ProcessFlags,
    TraverseFlags,
};
pub use grab::GrabStack;
pub use processor::{AreaEventProcessor, MouseSignals};
pub use routing::RoutingState;
