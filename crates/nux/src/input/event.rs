//! Platform input events and the flags threaded through dispatch.

use crate::geometry::Point;

macro_rules! flag_ops {
    ($name:ident) => {
        impl $name {
            /// Returns true if every flag in `other` is also set in `self`.
            #[inline]
            pub fn contains(self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            /// Returns true if no flag is set.
            #[inline]
            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Raw bits.
            #[inline]
            pub fn bits(self) -> u8 {
                self.0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self::Output {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self::Output {
                Self(self.0 & rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

pub(crate) use flag_ops;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Button4 = 3,
    /// Additional button 2 (e.g., browser forward).
    Button5 = 4,
}

/// Set of mouse buttons held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseButtons(u8);

flag_ops!(MouseButtons);

impl MouseButtons {
    /// No button held.
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << MouseButton::Left as u8);
    pub const RIGHT: Self = Self(1 << MouseButton::Right as u8);
    pub const MIDDLE: Self = Self(1 << MouseButton::Middle as u8);

    /// The set holding only `button`.
    pub const fn from_button(button: MouseButton) -> Self {
        Self(1 << button as u8)
    }

    /// Whether `button` is held.
    pub fn is_pressed(self, button: MouseButton) -> bool {
        self.contains(Self::from_button(button))
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Kind of a platform input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseWheel,
    KeyDown,
    KeyUp,
    /// The window lost input focus.
    WindowExitFocus,
    /// A drag-and-drop operation moved over the window.
    DndMove,
    /// A drag-and-drop operation was dropped on the window.
    DndDrop,
}

impl EventKind {
    /// Pointer events, including window focus loss.
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            Self::MouseDown | Self::MouseUp | Self::MouseMove | Self::MouseWheel | Self::WindowExitFocus
        )
    }

    pub fn is_key(self) -> bool {
        matches!(self, Self::KeyDown | Self::KeyUp)
    }

    pub fn is_dnd(self) -> bool {
        matches!(self, Self::DndMove | Self::DndDrop)
    }
}

/// A platform input event in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    /// Pointer position. Meaningless for key events.
    pub position: Point,
    /// Button that changed state, for presses and releases.
    pub button: Option<MouseButton>,
    /// Buttons held after the event.
    pub buttons: MouseButtons,
    pub modifiers: KeyboardModifiers,
    pub wheel_delta: f32,
    pub key_code: u32,
    pub character: Option<char>,
    pub repeat_count: u32,
    /// Platform timestamp in milliseconds.
    pub timestamp: u64,
    /// Set by the platform, or by click synthesis, on the second press of a
    /// double click.
    pub double_click: bool,
}

impl InputEvent {
    fn new(kind: EventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            button: None,
            buttons: MouseButtons::NONE,
            modifiers: KeyboardModifiers::NONE,
            wheel_delta: 0.0,
            key_code: 0,
            character: None,
            repeat_count: 0,
            timestamp: 0,
            double_click: false,
        }
    }

    /// A button press.
    pub fn mouse_down(x: f32, y: f32, button: MouseButton) -> Self {
        Self {
            button: Some(button),
            buttons: MouseButtons::from_button(button),
            ..Self::new(EventKind::MouseDown, Point::new(x, y))
        }
    }

    /// A button release.
    pub fn mouse_up(x: f32, y: f32, button: MouseButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(EventKind::MouseUp, Point::new(x, y))
        }
    }

    /// Pointer motion.
    pub fn mouse_move(x: f32, y: f32) -> Self {
        Self::new(EventKind::MouseMove, Point::new(x, y))
    }

    /// Wheel rotation; positive deltas scroll up.
    pub fn mouse_wheel(x: f32, y: f32, delta: f32) -> Self {
        Self {
            wheel_delta: delta,
            ..Self::new(EventKind::MouseWheel, Point::new(x, y))
        }
    }

    pub fn key_down(key_code: u32, character: Option<char>) -> Self {
        Self {
            key_code,
            character,
            ..Self::new(EventKind::KeyDown, Point::ZERO)
        }
    }

    pub fn key_up(key_code: u32, character: Option<char>) -> Self {
        Self {
            key_code,
            character,
            ..Self::new(EventKind::KeyUp, Point::ZERO)
        }
    }

    /// The window lost focus; the pointer is treated as outside every area.
    pub fn window_exit_focus() -> Self {
        Self::new(EventKind::WindowExitFocus, Point::new(-1.0, -1.0))
    }

    pub fn dnd_move(x: f32, y: f32) -> Self {
        Self::new(EventKind::DndMove, Point::new(x, y))
    }

    pub fn dnd_drop(x: f32, y: f32) -> Self {
        Self::new(EventKind::DndDrop, Point::new(x, y))
    }

    /// Sets the held buttons.
    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Marks a press as the second press of a double click.
    pub fn with_double_click(mut self, double_click: bool) -> Self {
        self.double_click = double_click;
        self
    }

    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }
}

/// Dispatch state accumulated while an event travels through areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TraverseFlags(u8);

flag_ops!(TraverseFlags);

impl TraverseFlags {
    pub const NONE: Self = Self(0);
    /// An area claimed the pointer event.
    pub const MOUSE_EVENT_SOLVED: Self = Self(1 << 0);
    /// An area consumed the key event.
    pub const KEY_EVENT_SOLVED: Self = Self(1 << 1);
}

/// Caller instructions for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcessFlags(u8);

flag_ops!(ProcessFlags);

impl ProcessFlags {
    pub const NONE: Self = Self(0);
    /// The event was consumed before reaching the areas. Areas keep their
    /// hover and focus bookkeeping current but claim nothing.
    pub const DO_NOT_PROCESS: Self = Self(1 << 0);
    /// Deliver to areas outside the exclusive area as well.
    pub const CYCLE_EXCLUSIVE: Self = Self(1 << 1);
}
