//! Hardware-independent page indicator widget for pagedot-rs
//!
//! This crate renders a horizontal row of page indicators (tinted dots,
//! custom images, or tinted masks) on any `embedded-graphics` draw target,
//! tracks the current page, and turns touch releases into page-change
//! events. The host framework owns event delivery and the redraw schedule;
//! the widget only flags itself dirty.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod accessibility;
pub mod bitmap;
pub mod config;
pub mod control;
pub mod event;
pub mod layout;
pub mod resolve;
pub mod scroll;
pub mod widget;

#[cfg(test)]
pub(crate) mod testutil;

pub use bitmap::{Bitmap, BitmapError, Mask};
pub use config::PageControlConfig;
pub use control::{MAX_PAGE_NAME_LEN, MIN_CONTROL_HEIGHT, PageControl};
pub use event::{ControlEvent, TouchEvent, TouchPoint, TouchResult};
pub use layout::{Alignment, IndicatorLayout, VerticalAlignment};
pub use resolve::{IndicatorState, ResolvedIndicator};
pub use scroll::{ScrollRegion, ScrollTarget};
pub use widget::{Drawable, Touchable};
