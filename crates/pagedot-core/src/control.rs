//! The page indicator control.
//!
//! [`PageControl`] owns every piece of widget state: page counts, the
//! current/displayed page split, indicator geometry, visual-source slots,
//! tint colors, per-page overrides, and the accessibility mirror. All
//! mutation goes through setters; any setter that touches a visual source
//! funnels through a single measured-size recompute and flags the control
//! dirty. Drawing is a pure read of that state.
//!
//! Boundary conditions are normal control flow here: out-of-range page
//! indices no-op, missing visual sources fall through the resolver tiers,
//! and a zero page count is a valid steady state with no current page.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_layout::View;
use log::debug;

use crate::accessibility::{AccessibilityMirror, compose_value};
use crate::bitmap::{Bitmap, Mask};
use crate::config::PageControlConfig;
use crate::event::{ControlEvent, TouchEvent, TouchPoint, TouchResult};
use crate::layout::{Alignment, IndicatorLayout, VerticalAlignment};
use crate::resolve::{IndicatorSources, IndicatorState, ResolvedIndicator, resolve};
use crate::scroll::ScrollTarget;
use crate::widget::{Drawable, Touchable};

/// Minimum control height applied by [`PageControl::size_to_fit`].
pub const MIN_CONTROL_HEIGHT: u32 = 36;

/// Capacity of a per-page accessibility name.
pub const MAX_PAGE_NAME_LEN: usize = 32;

/// Fallback tint for the current page's indicator when none is configured.
const FALLBACK_CURRENT_TINT: Rgb565 = Rgb565::WHITE;

/// Fallback tint for non-current indicators when none is configured.
///
/// Stands in for 30 % white over a dark background; RGB565 has no alpha.
const FALLBACK_NORMAL_TINT: Rgb565 = Rgb565::new(9, 19, 9);

/// Deferred-display latch.
///
/// `Pending` between a deferrable page change and the explicit commit via
/// [`PageControl::update_current_page_display`], which is the only
/// transition back to `Committed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DisplayLatch {
    #[default]
    Committed,
    Pending,
}

/// Horizontal row of page indicators with touch-driven paging.
pub struct PageControl {
    bounds: Rectangle,
    page_count: usize,
    /// Logical selection; `None` while there are no pages.
    current_page: Option<usize>,
    /// What is actually rendered; lags behind `current_page` while the
    /// display latch is pending.
    displayed_page: Option<usize>,
    latch: DisplayLatch,
    layout: IndicatorLayout,
    hides_for_single_page: bool,
    defers_current_page_display: bool,
    page_indicator_tint: Option<Rgb565>,
    current_page_indicator_tint: Option<Rgb565>,
    global_image: Option<Bitmap>,
    global_current_image: Option<Bitmap>,
    global_mask_source: Option<Bitmap>,
    global_derived_mask: Option<Mask>,
    page_images: BTreeMap<usize, Bitmap>,
    current_page_images: BTreeMap<usize, Bitmap>,
    page_mask_sources: BTreeMap<usize, Bitmap>,
    /// Eagerly derived masks, kept in step with `page_mask_sources`.
    derived_page_masks: BTreeMap<usize, Mask>,
    page_names: BTreeMap<usize, heapless::String<MAX_PAGE_NAME_LEN>>,
    mirror: AccessibilityMirror,
    dirty: bool,
}

impl PageControl {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            page_count: 0,
            current_page: None,
            displayed_page: None,
            latch: DisplayLatch::default(),
            layout: IndicatorLayout::default(),
            hides_for_single_page: false,
            defers_current_page_display: false,
            page_indicator_tint: None,
            current_page_indicator_tint: None,
            global_image: None,
            global_current_image: None,
            global_mask_source: None,
            global_derived_mask: None,
            page_images: BTreeMap::new(),
            current_page_images: BTreeMap::new(),
            page_mask_sources: BTreeMap::new(),
            derived_page_masks: BTreeMap::new(),
            page_names: BTreeMap::new(),
            mirror: AccessibilityMirror::new(),
            dirty: true,
        }
    }

    // -----------------------------------------------------------------
    // Page state
    // -----------------------------------------------------------------

    /// Set the total number of pages.
    ///
    /// Resets the accessibility mirror and re-clamps the current and
    /// displayed pages into the new range.
    pub fn set_page_count(&mut self, page_count: usize) {
        if self.page_count == page_count {
            return;
        }

        self.page_count = page_count;
        self.mirror.set_pages(page_count);

        if page_count == 0 {
            self.current_page = None;
            self.displayed_page = None;
        } else {
            let current = self.current_page.unwrap_or(0).min(page_count - 1);
            self.current_page = Some(current);
            self.displayed_page = Some(self.displayed_page.unwrap_or(0).min(page_count - 1));
            self.mirror.set_current(current);
        }

        self.mark_dirty();
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Directly select a page: clamped, displayed immediately, no event.
    pub fn set_current_page(&mut self, page: i32) {
        self.set_current_page_with(page, false, false);
    }

    /// Select a page with full control over event emission and deferral.
    ///
    /// The input is clamped into `[0, page_count - 1]`. The displayed page
    /// follows immediately unless deferred-display mode is enabled *and*
    /// `can_defer` is set, in which case the display latch goes pending
    /// until [`update_current_page_display`](Self::update_current_page_display).
    /// When `send_event` is set a [`ControlEvent::ValueChanged`] is
    /// returned whether or not the displayed page moved.
    pub fn set_current_page_with(
        &mut self,
        page: i32,
        send_event: bool,
        can_defer: bool,
    ) -> Option<ControlEvent> {
        self.current_page = self.clamp_page(page);
        if let Some(current) = self.current_page {
            self.mirror.set_current(current);
        }

        if self.defers_current_page_display && can_defer {
            self.latch = DisplayLatch::Pending;
        } else {
            self.displayed_page = self.current_page;
            self.latch = DisplayLatch::Committed;
            self.mark_dirty();
        }

        if send_event {
            self.current_page.map(|page| ControlEvent::ValueChanged { page })
        } else {
            None
        }
    }

    /// Commit a deferred page change: displayed = current, redraw.
    pub fn update_current_page_display(&mut self) {
        self.displayed_page = self.current_page;
        self.latch = DisplayLatch::Committed;
        self.mark_dirty();
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    pub fn displayed_page(&self) -> Option<usize> {
        self.displayed_page
    }

    /// Whether a deferred page change is waiting for the commit call.
    pub fn is_display_pending(&self) -> bool {
        self.latch == DisplayLatch::Pending
    }

    fn clamp_page(&self, page: i32) -> Option<usize> {
        if self.page_count == 0 {
            None
        } else {
            Some(page.clamp(0, self.page_count as i32 - 1) as usize)
        }
    }

    // -----------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.mark_dirty();
        }
    }

    pub fn set_indicator_diameter(&mut self, diameter: u32) {
        if self.layout.diameter == diameter {
            return;
        }
        self.layout.diameter = diameter;
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn indicator_diameter(&self) -> u32 {
        self.layout.diameter
    }

    pub fn set_indicator_margin(&mut self, margin: u32) {
        if self.layout.margin == margin {
            return;
        }
        self.layout.margin = margin;
        self.mark_dirty();
    }

    pub fn indicator_margin(&self) -> u32 {
        self.layout.margin
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        if self.layout.alignment != alignment {
            self.layout.alignment = alignment;
            self.mark_dirty();
        }
    }

    pub fn alignment(&self) -> Alignment {
        self.layout.alignment
    }

    pub fn set_vertical_alignment(&mut self, vertical_alignment: VerticalAlignment) {
        if self.layout.vertical_alignment != vertical_alignment {
            self.layout.vertical_alignment = vertical_alignment;
            self.mark_dirty();
        }
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.layout.vertical_alignment
    }

    pub fn set_hides_for_single_page(&mut self, hides: bool) {
        if self.hides_for_single_page != hides {
            self.hides_for_single_page = hides;
            self.mark_dirty();
        }
    }

    pub fn hides_for_single_page(&self) -> bool {
        self.hides_for_single_page
    }

    pub fn set_defers_current_page_display(&mut self, defers: bool) {
        self.defers_current_page_display = defers;
    }

    pub fn defers_current_page_display(&self) -> bool {
        self.defers_current_page_display
    }

    /// Footprint of a row of `page_count` indicators at the current
    /// geometry.
    pub fn size_for_page_count(&self, page_count: usize) -> Size {
        self.layout.size_for_pages(page_count)
    }

    /// Reserved rectangle for one indicator; zero when out of range.
    pub fn rect_for_page_indicator(&self, page_index: usize) -> Rectangle {
        self.layout
            .rect_for_page(page_index, self.page_count, &self.bounds)
    }

    /// Effective per-slot indicator size (width, height).
    pub fn measured_indicator_size(&self) -> Size {
        Size::new(self.layout.measured_width, self.layout.measured_height)
    }

    /// Resize the control to its content, with a minimum height floor.
    pub fn size_to_fit(&mut self) {
        let mut size = self.layout.size_for_pages(self.page_count);
        size.height = size.height.max(MIN_CONTROL_HEIGHT);
        self.bounds.size = size;
        self.mark_dirty();
    }

    // -----------------------------------------------------------------
    // Visual sources
    // -----------------------------------------------------------------

    /// Default indicator image for non-current pages; `None` clears it.
    pub fn set_page_indicator_image(&mut self, image: Option<Bitmap>) {
        if self.global_image == image {
            return;
        }
        self.global_image = image;
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn page_indicator_image(&self) -> Option<&Bitmap> {
        self.global_image.as_ref()
    }

    /// Default indicator image for the current page; `None` clears it.
    pub fn set_current_page_indicator_image(&mut self, image: Option<Bitmap>) {
        if self.global_current_image == image {
            return;
        }
        self.global_current_image = image;
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn current_page_indicator_image(&self) -> Option<&Bitmap> {
        self.global_current_image.as_ref()
    }

    /// Default mask image; its single-channel mask is derived immediately.
    pub fn set_page_indicator_mask_image(&mut self, image: Option<Bitmap>) {
        if self.global_mask_source == image {
            return;
        }
        self.global_derived_mask = image.as_ref().map(Bitmap::to_mask);
        self.global_mask_source = image;
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn page_indicator_mask_image(&self) -> Option<&Bitmap> {
        self.global_mask_source.as_ref()
    }

    pub fn set_page_indicator_tint(&mut self, color: Option<Rgb565>) {
        self.page_indicator_tint = color;
        self.mark_dirty();
    }

    pub fn set_current_page_indicator_tint(&mut self, color: Option<Rgb565>) {
        self.current_page_indicator_tint = color;
        self.mark_dirty();
    }

    /// Per-page indicator image override. Out-of-range indices no-op;
    /// `None` removes the override.
    pub fn set_image_for_page(&mut self, image: Option<Bitmap>, page: usize) {
        if page >= self.page_count {
            return;
        }
        match image {
            Some(image) => {
                self.page_images.insert(page, image);
            }
            None => {
                self.page_images.remove(&page);
            }
        }
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn image_for_page(&self, page: usize) -> Option<&Bitmap> {
        self.page_images.get(&page)
    }

    /// Per-page current-state image override.
    pub fn set_current_image_for_page(&mut self, image: Option<Bitmap>, page: usize) {
        if page >= self.page_count {
            return;
        }
        match image {
            Some(image) => {
                self.current_page_images.insert(page, image);
            }
            None => {
                self.current_page_images.remove(&page);
            }
        }
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn current_image_for_page(&self, page: usize) -> Option<&Bitmap> {
        self.current_page_images.get(&page)
    }

    /// Per-page mask override. The derived mask is created here, at set
    /// time, and removed together with the source on `None`.
    pub fn set_image_mask_for_page(&mut self, image: Option<Bitmap>, page: usize) {
        if page >= self.page_count {
            return;
        }
        match image {
            Some(image) => {
                self.derived_page_masks.insert(page, image.to_mask());
                self.page_mask_sources.insert(page, image);
            }
            None => {
                self.page_mask_sources.remove(&page);
                self.derived_page_masks.remove(&page);
            }
        }
        self.update_measured_sizes();
        self.mark_dirty();
    }

    pub fn image_mask_for_page(&self, page: usize) -> Option<&Bitmap> {
        self.page_mask_sources.get(&page)
    }

    /// Recompute the measured indicator slot size from scratch.
    ///
    /// The measured size is the maximum of the dot diameter and every
    /// image or mask source currently in effect; it is never incrementally
    /// adjusted.
    fn update_measured_sizes(&mut self) {
        let mut width = self.layout.diameter;
        let mut height = self.layout.diameter;

        let globals = [
            self.global_image.as_ref(),
            self.global_current_image.as_ref(),
            self.global_mask_source.as_ref(),
        ];
        let sources = globals
            .into_iter()
            .flatten()
            .chain(self.page_images.values())
            .chain(self.current_page_images.values())
            .chain(self.page_mask_sources.values());

        for source in sources {
            let size = source.size();
            width = width.max(size.width);
            height = height.max(size.height);
        }

        self.layout.measured_width = width;
        self.layout.measured_height = height;
    }

    // -----------------------------------------------------------------
    // Accessibility
    // -----------------------------------------------------------------

    /// Per-page accessibility name. Out-of-range indices no-op; names
    /// are truncated to [`MAX_PAGE_NAME_LEN`] bytes.
    pub fn set_name_for_page(&mut self, name: Option<&str>, page: usize) {
        if page >= self.page_count {
            return;
        }
        match name {
            Some(name) => {
                let mut stored: heapless::String<MAX_PAGE_NAME_LEN> = heapless::String::new();
                for c in name.chars() {
                    if stored.push(c).is_err() {
                        break;
                    }
                }
                self.page_names.insert(page, stored);
            }
            None => {
                self.page_names.remove(&page);
            }
        }
    }

    pub fn name_for_page(&self, page: usize) -> Option<&str> {
        if page >= self.page_count {
            return None;
        }
        self.page_names.get(&page).map(|name| name.as_str())
    }

    /// Human-readable value for assistive technology:
    /// `"{name} - {underlying}"` when the current page is named, else the
    /// mirror's value (empty when there are no pages).
    pub fn accessibility_value(&self) -> String {
        let name = self.current_page.and_then(|page| self.name_for_page(page));
        let underlying = self.mirror.underlying_value();
        compose_value(name, underlying.as_deref())
    }

    // -----------------------------------------------------------------
    // Scroll syncing
    // -----------------------------------------------------------------

    /// Derive the current page from a scroll position.
    ///
    /// Reads the offset only; the displayed page is untouched until the
    /// next commit or direct page set, and no event is emitted.
    pub fn update_page_for_scroll<S: ScrollTarget>(&mut self, scroll: &S) {
        let width = scroll.page_width();
        if width == 0 {
            return;
        }
        let page = scroll.content_offset().x.div_euclid(width as i32);
        self.current_page = self.clamp_page(page);
        if let Some(current) = self.current_page {
            self.mirror.set_current(current);
        }
    }

    /// Move the scroll target so the current page is in view.
    pub fn sync_scroll_to_current_page<S: ScrollTarget>(&self, scroll: &mut S) {
        let Some(current) = self.current_page else {
            return;
        };
        let mut offset = scroll.content_offset();
        offset.x = (scroll.page_width() * current as u32) as i32;
        scroll.set_content_offset(offset);
    }

    // -----------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------

    /// Snapshot the appearance configuration.
    pub fn config(&self) -> PageControlConfig {
        PageControlConfig {
            indicator_diameter: self.layout.diameter,
            indicator_margin: self.layout.margin,
            alignment: self.layout.alignment,
            vertical_alignment: self.layout.vertical_alignment,
            hides_for_single_page: self.hides_for_single_page,
            defers_current_page_display: self.defers_current_page_display,
            page_indicator_tint: self.page_indicator_tint.map(IntoStorage::into_storage),
            current_page_indicator_tint: self
                .current_page_indicator_tint
                .map(IntoStorage::into_storage),
        }
    }

    /// Apply a previously saved appearance configuration.
    pub fn apply_config(&mut self, config: &PageControlConfig) {
        self.layout.diameter = config.indicator_diameter;
        self.layout.margin = config.indicator_margin;
        self.layout.alignment = config.alignment;
        self.layout.vertical_alignment = config.vertical_alignment;
        self.hides_for_single_page = config.hides_for_single_page;
        self.defers_current_page_display = config.defers_current_page_display;
        self.page_indicator_tint = config
            .page_indicator_tint
            .map(|word| Rgb565::from(RawU16::new(word)));
        self.current_page_indicator_tint = config
            .current_page_indicator_tint
            .map(|word| Rgb565::from(RawU16::new(word)));
        self.update_measured_sizes();
        self.mark_dirty();
    }

    // -----------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn sources(&self) -> IndicatorSources<'_> {
        IndicatorSources {
            page_images: &self.page_images,
            current_page_images: &self.current_page_images,
            page_mask_sources: &self.page_mask_sources,
            derived_page_masks: &self.derived_page_masks,
            global_image: self.global_image.as_ref(),
            global_current_image: self.global_current_image.as_ref(),
            global_mask_source: self.global_mask_source.as_ref(),
            global_derived_mask: self.global_derived_mask.as_ref(),
        }
    }

    fn render_pages<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.page_count < 2 && self.hides_for_single_page {
            return Ok(());
        }

        let sources = self.sources();
        let measured_width = self.layout.measured_width as i32;
        let mut x = self.layout.left_offset(self.page_count, &self.bounds);

        for page in 0..self.page_count {
            let state = if Some(page) == self.displayed_page {
                IndicatorState::Current
            } else {
                IndicatorState::Normal
            };
            let fill = match state {
                IndicatorState::Current => self
                    .current_page_indicator_tint
                    .unwrap_or(FALLBACK_CURRENT_TINT),
                IndicatorState::Normal => {
                    self.page_indicator_tint.unwrap_or(FALLBACK_NORMAL_TINT)
                }
            };

            match resolve(&sources, page, state, self.layout.diameter) {
                ResolvedIndicator::Image(image) => {
                    let size = image.size();
                    let top = self.layout.top_offset_for_height(size.height, &self.bounds);
                    let centered = x + (measured_width - size.width as i32) / 2;
                    image.draw_at(Point::new(centered, top), display)?;
                }
                ResolvedIndicator::Masked { mask, size } => {
                    let top = self.layout.top_offset_for_height(size.height, &self.bounds);
                    let centered = x + (measured_width - size.width as i32) / 2;
                    mask.draw_tinted(Point::new(centered, top), fill, display)?;
                }
                ResolvedIndicator::Dot { diameter } => {
                    let top = self.layout.top_offset_for_height(diameter, &self.bounds);
                    let centered = x + (measured_width - diameter as i32) / 2;
                    Circle::new(Point::new(centered, top), diameter)
                        .into_styled(PrimitiveStyle::with_fill(fill))
                        .draw(display)?;
                }
            }

            x += measured_width + self.layout.margin as i32;
        }

        Ok(())
    }
}

impl Drawable for PageControl {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.render_pages(display)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for PageControl {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) | TouchEvent::Drag(point) => {
                if self.contains_point(point) {
                    TouchResult::Handled
                } else {
                    TouchResult::NotHandled
                }
            }
            TouchEvent::Release(point) => {
                if !self.contains_point(point) {
                    return TouchResult::NotHandled;
                }

                let current = self.current_page.map_or(-1, |page| page as i32);
                let middle = self.layout.midpoint_x(self.page_count, &self.bounds);
                let target = if (point.x as i32) < middle {
                    current - 1
                } else {
                    current + 1
                };
                debug!(
                    "touch release at ({}, {}), midpoint {}, page {} -> {}",
                    point.x, point.y, middle, current, target
                );

                match self.set_current_page_with(target, true, true) {
                    Some(event) => TouchResult::Event(event),
                    None => TouchResult::Handled,
                }
            }
        }
    }
}

impl View for PageControl {
    fn translate_impl(&mut self, by: Point) {
        self.bounds.top_left += by;
        self.dirty = true;
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}
