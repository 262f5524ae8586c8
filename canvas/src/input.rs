//! Input model: mouse buttons, keys, cursors, and the press/pan state machine.
//!
//! `InputState` is the gesture tracked between mouse-down and mouse-up. The
//! grab modifier (space held) lives outside it in `can_grab`, because it is
//! toggled by the keyboard independently of any press and only changes how
//! the next press and subsequent moves are interpreted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key, holding the DOM `KeyboardEvent.code` (e.g. `"Space"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the grab modifier key.
    #[must_use]
    pub fn is_grab(&self) -> bool {
        self.0 == "Space"
    }
}

/// Wheel / trackpad scroll delta. Horizontal scroll does not zoom and is not tracked.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Mouse cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Ready to paint.
    Crosshair,
    /// Space held, ready to pan.
    Grab,
    /// Pan drag in progress.
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Crosshair => "crosshair",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Gesture tracked between mouse-down and mouse-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No button held.
    #[default]
    Idle,
    /// A button is held without a pan drag; moves paint unless space is held.
    Pressed,
    /// A pan drag started with space held.
    Panning {
        /// Pointer position minus pan at the moment the drag started.
        grab_offset: Point,
    },
}

impl InputState {
    /// Whether a mouse button is currently held.
    #[must_use]
    pub fn is_mouse_down(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
