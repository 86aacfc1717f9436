//! Indicator layout engine.
//!
//! Pure geometry: given a page count, the measured per-indicator size, the
//! inter-indicator margin, and the alignment configuration, this module
//! computes the total footprint of the indicator row, where the row starts
//! inside an arbitrary bounding rectangle, and the reserved rectangle for
//! each indicator slot. Nothing in here touches a display.
//!
//! All coordinates are integer pixels, matching the `embedded-graphics`
//! coordinate model.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

/// Default dot diameter in pixels.
pub const DEFAULT_INDICATOR_DIAMETER: u32 = 6;

/// Default spacing between adjacent indicators in pixels.
pub const DEFAULT_INDICATOR_MARGIN: u32 = 10;

/// Horizontal placement of the indicator row within the control bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of a single indicator within the control bounds.
///
/// Vertical alignment is resolved per indicator rather than once for the
/// whole row, because indicators backed by images may have differing
/// heights. Each is positioned independently against the full bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Geometry inputs for the indicator row.
///
/// `measured_width` / `measured_height` are derived values: the maximum of
/// the configured diameter and the dimensions of every image or mask
/// source currently in effect. [`PageControl`](crate::control::PageControl)
/// recomputes them from scratch whenever a contributing source changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorLayout {
    pub diameter: u32,
    pub margin: u32,
    pub measured_width: u32,
    pub measured_height: u32,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
}

impl Default for IndicatorLayout {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_INDICATOR_DIAMETER,
            margin: DEFAULT_INDICATOR_MARGIN,
            measured_width: DEFAULT_INDICATOR_DIAMETER,
            measured_height: DEFAULT_INDICATOR_DIAMETER,
            alignment: Alignment::default(),
            vertical_alignment: VerticalAlignment::default(),
        }
    }
}

impl IndicatorLayout {
    /// Total footprint of a row of `page_count` indicators.
    ///
    /// Width is `n * measured_width + max(0, n - 1) * margin`; height is the
    /// measured indicator height. A zero page count yields a zero width.
    pub fn size_for_pages(&self, page_count: usize) -> Size {
        let indicator_space = page_count as u32 * self.measured_width;
        let margin_space = page_count.saturating_sub(1) as u32 * self.margin;
        Size::new(indicator_space + margin_space, self.measured_height)
    }

    /// X coordinate where the indicator row starts inside `bounds`.
    pub fn left_offset(&self, page_count: usize, bounds: &Rectangle) -> i32 {
        let footprint = self.size_for_pages(page_count).width as i32;
        let left = bounds.top_left.x;
        match self.alignment {
            Alignment::Left => left,
            Alignment::Center => left + bounds.size.width as i32 / 2 - footprint / 2,
            Alignment::Right => left + bounds.size.width as i32 - footprint,
        }
    }

    /// Y coordinate for an indicator of the given height inside `bounds`.
    pub fn top_offset_for_height(&self, height: u32, bounds: &Rectangle) -> i32 {
        let top = bounds.top_left.y;
        match self.vertical_alignment {
            VerticalAlignment::Top => top,
            VerticalAlignment::Middle => {
                top + bounds.size.height as i32 / 2 - height as i32 / 2
            }
            VerticalAlignment::Bottom => top + bounds.size.height as i32 - height as i32,
        }
    }

    /// Reserved rectangle for the indicator at `page_index`.
    ///
    /// The rectangle is a square of side `measured_width` at `y = 0`; the
    /// caller resolves the vertical position per visual source. An index at
    /// or past `page_count` yields a zero rectangle rather than an error.
    pub fn rect_for_page(
        &self,
        page_index: usize,
        page_count: usize,
        bounds: &Rectangle,
    ) -> Rectangle {
        if page_index >= page_count {
            return Rectangle::zero();
        }

        let left = self.left_offset(page_count, bounds);
        let through = self.size_for_pages(page_index + 1).width as i32;
        Rectangle::new(
            Point::new(left + through - self.measured_width as i32, 0),
            Size::new(self.measured_width, self.measured_width),
        )
    }

    /// Horizontal midpoint of the full indicator row.
    ///
    /// Tap targeting is a coarse two-region decision: a point strictly left
    /// of the midpoint means "previous page", everything else means "next
    /// page". There is no per-indicator hit testing.
    pub fn midpoint_x(&self, page_count: usize, bounds: &Rectangle) -> i32 {
        let footprint = self.size_for_pages(page_count).width as i32;
        self.left_offset(page_count, bounds) + footprint / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> IndicatorLayout {
        IndicatorLayout::default()
    }

    fn bounds_200() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(200, 36))
    }

    #[test]
    fn footprint_matches_formula() {
        let layout = layout();
        for n in 0..10usize {
            let expected = n as u32 * 6 + n.saturating_sub(1) as u32 * 10;
            assert_eq!(layout.size_for_pages(n).width, expected, "n = {}", n);
            assert_eq!(layout.size_for_pages(n).height, 6);
        }
    }

    #[test]
    fn zero_pages_has_zero_width() {
        assert_eq!(layout().size_for_pages(0).width, 0);
    }

    #[test]
    fn centered_left_offset() {
        // 3 pages: 3*6 + 2*10 = 38; centered in 200px -> 100 - 19 = 81
        assert_eq!(layout().left_offset(3, &bounds_200()), 81);
    }

    #[test]
    fn left_and_right_offsets() {
        let mut layout = layout();
        layout.alignment = Alignment::Left;
        assert_eq!(layout.left_offset(3, &bounds_200()), 0);
        layout.alignment = Alignment::Right;
        assert_eq!(layout.left_offset(3, &bounds_200()), 200 - 38);
    }

    #[test]
    fn left_offset_respects_bounds_origin() {
        let bounds = Rectangle::new(Point::new(40, 10), Size::new(200, 36));
        let mut layout = layout();
        layout.alignment = Alignment::Left;
        assert_eq!(layout.left_offset(3, &bounds), 40);
        layout.alignment = Alignment::Center;
        assert_eq!(layout.left_offset(3, &bounds), 40 + 81);
    }

    #[test]
    fn top_offsets() {
        let mut layout = layout();
        let bounds = bounds_200();
        layout.vertical_alignment = VerticalAlignment::Top;
        assert_eq!(layout.top_offset_for_height(6, &bounds), 0);
        layout.vertical_alignment = VerticalAlignment::Middle;
        assert_eq!(layout.top_offset_for_height(6, &bounds), 15);
        layout.vertical_alignment = VerticalAlignment::Bottom;
        assert_eq!(layout.top_offset_for_height(6, &bounds), 30);
    }

    #[test]
    fn rect_for_last_page_in_scenario() {
        // left 81, through 3 slots = 38, minus slot width 6 -> x = 113
        let rect = layout().rect_for_page(2, 3, &bounds_200());
        assert_eq!(rect.top_left, Point::new(113, 0));
        assert_eq!(rect.size, Size::new(6, 6));
    }

    #[test]
    fn rects_are_ordered_and_margin_spaced() {
        let layout = layout();
        let bounds = bounds_200();
        for i in 0..4usize {
            let a = layout.rect_for_page(i, 5, &bounds);
            let b = layout.rect_for_page(i + 1, 5, &bounds);
            let a_right = a.top_left.x + a.size.width as i32;
            assert!(a_right <= b.top_left.x);
            assert_eq!(b.top_left.x - a_right, 10);
        }
    }

    #[test]
    fn out_of_range_rect_is_zero() {
        assert_eq!(layout().rect_for_page(3, 3, &bounds_200()), Rectangle::zero());
        assert_eq!(layout().rect_for_page(0, 0, &bounds_200()), Rectangle::zero());
    }

    #[test]
    fn midpoint_splits_footprint() {
        // left 81 + 38/2 = 100
        assert_eq!(layout().midpoint_x(3, &bounds_200()), 100);
    }
}
