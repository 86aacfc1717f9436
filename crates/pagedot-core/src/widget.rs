//! Core widget traits: drawing, dirty tracking, and touch handling.
//!
//! The host owns the redraw schedule. A widget only flags itself dirty;
//! whoever drives the frame loop checks [`Drawable::is_dirty`], draws, and
//! calls [`Drawable::mark_clean`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::event::{TouchEvent, TouchPoint, TouchResult};

/// Trait for any UI element that can be drawn.
pub trait Drawable {
    /// Draw the element to the display. Read-only against the element's
    /// state; the dirty flag is cleared separately via [`mark_clean`].
    ///
    /// [`mark_clean`]: Drawable::mark_clean
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);
}

/// Trait for UI elements that respond to touch events.
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any event
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
