//! Touch input and control event types.

use embedded_graphics::prelude::*;

/// A 2D touch point on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events delivered by the host input layer.
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
    /// Touch lifted at a point
    Release(TouchPoint),
}

/// Result from handling a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to the next element
    NotHandled,
    /// Event produced a control notification
    Event(ControlEvent),
}

/// Notifications a control emits toward its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// The selected page changed through user interaction
    ValueChanged {
        /// The newly selected page index
        page: usize,
    },
}
