//! Input types exchanged between the host shell and the editor session.
//!
//! The host translates its windowing events into these types; the session
//! answers with an [`InputResult`] telling the host whether the event was
//! consumed and whether the viewport needs a redraw.

use serde::{Deserialize, Serialize};

/// Identifies one physical pointer (mouse, pen, or touch contact).
pub type PointerId = u32;

/// Input event passed to the editor session.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed.
    PointerDown {
        pointer_id: PointerId,
        button: MouseButton,
        viewport_pos: (f32, f32),
    },
    /// Pointer moved, pressed or not.
    PointerMove {
        pointer_id: PointerId,
        viewport_pos: (f32, f32),
    },
    /// Pointer button released.
    PointerUp {
        pointer_id: PointerId,
        button: MouseButton,
        viewport_pos: (f32, f32),
    },
    /// Scroll wheel, in lines.
    Scroll { lines: f32 },
    /// Key pressed.
    KeyPress { key: KeyCode, modifiers: Modifiers },
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Delete,
    B,
    C,
    P,
    W,
    Z,
    Unknown,
}

impl KeyCode {
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'B' => KeyCode::B,
            'C' => KeyCode::C,
            'P' => KeyCode::P,
            'W' => KeyCode::W,
            'Z' => KeyCode::Z,
            _ => KeyCode::Unknown,
        }
    }
}

/// Modifier state at the time of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
    pub shift: bool,
    /// Set by the host when a text field has keyboard focus.
    pub text_input_focused: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Result of an input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResult {
    /// If true, the event was consumed and should not propagate further.
    pub consumed: bool,
    /// If true, the viewport should be redrawn.
    pub redraw: bool,
}

impl InputResult {
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            redraw: true,
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn redraw_only() -> Self {
        Self {
            consumed: false,
            redraw: true,
        }
    }
}
