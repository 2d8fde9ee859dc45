//! Input events consumed by the tools.
//!
//! The editor translates raw host input (pointer positions, key
//! releases, dock interactions, clipboard completions) into these
//! events; tools never talk to the host input layer directly.

use crate::dock::DockEvent;
use kurbo::{Point, Vec2};

/// Keys the tools care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    A,
    C,
    E,
    V,
    Y,
    Z,
    Space,
    Escape,
    Delete,
}

/// One motion sample within a press-move-release gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Current pointer position.
    pub point: Point,
    /// Position at the previous sample (the press point on the first).
    pub last: Point,
    /// `point - last`.
    pub delta: Vec2,
    /// Samples seen so far in this gesture; 0 on the first motion
    /// sample, which is where a tool decides what the drag means.
    pub count: u32,
}

/// An input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerDown(Point),
    /// Pointer motion without a button held.
    PointerMove(Point),
    /// Pointer motion with the button held.
    PointerDrag(DragSample),
    PointerUp {
        point: Point,
        /// Where the press started; equal to `point` for a plain click.
        down: Point,
    },
    KeyUp {
        key: Key,
        ctrl: bool,
    },
    Dock(DockEvent),
    /// Completion of a [`crate::clipboard::Clipboard::request_read`].
    ClipboardText(String),
}
