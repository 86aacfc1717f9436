//! Scrollable-content abstraction for page syncing.
//!
//! The widget never owns a scroll view; hosts hand it anything that can
//! report and accept a horizontal content offset. Both sync directions
//! live on [`PageControl`](crate::control::PageControl):
//! `update_page_for_scroll` reads the offset into the current page, and
//! `sync_scroll_to_current_page` writes the page back out as an offset.

use embedded_graphics::prelude::*;

/// Horizontally scrollable paged content.
pub trait ScrollTarget {
    /// Current content offset in pixels.
    fn content_offset(&self) -> Point;

    /// Move the content to a new offset.
    fn set_content_offset(&mut self, offset: Point);

    /// Width of one page in pixels.
    fn page_width(&self) -> u32;
}

/// Minimal [`ScrollTarget`] implementation for hosts (and tests) that do
/// not bring their own scroll abstraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRegion {
    offset: Point,
    page_width: u32,
}

impl ScrollRegion {
    pub fn new(page_width: u32) -> Self {
        Self {
            offset: Point::zero(),
            page_width,
        }
    }
}

impl ScrollTarget for ScrollRegion {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn page_width(&self) -> u32 {
        self.page_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_stores_offset() {
        let mut region = ScrollRegion::new(320);
        assert_eq!(region.content_offset(), Point::zero());
        region.set_content_offset(Point::new(640, 0));
        assert_eq!(region.content_offset(), Point::new(640, 0));
        assert_eq!(region.page_width(), 320);
    }
}
