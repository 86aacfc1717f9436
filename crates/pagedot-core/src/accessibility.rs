//! Accessibility value composition.
//!
//! The widget mirrors its page count and current page into an
//! [`AccessibilityMirror`], the stand-in for whatever platform page control
//! the host exposes to assistive technology. The mirror produces the
//! underlying value string; [`compose_value`] prefixes it with the
//! per-page name when one is set.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Mirror of the page state exposed to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibilityMirror {
    pages: usize,
    current: usize,
}

impl AccessibilityMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the mirror for a new page count. The current page restarts
    /// at zero.
    pub fn set_pages(&mut self, pages: usize) {
        self.pages = pages;
        self.current = 0;
    }

    /// Track the current page. Out-of-range values are ignored.
    pub fn set_current(&mut self, page: usize) {
        if page < self.pages {
            self.current = page;
        }
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// The underlying value string, `None` when there are no pages.
    pub fn underlying_value(&self) -> Option<String> {
        if self.pages == 0 {
            return None;
        }
        Some(format!("{} of {}", self.current + 1, self.pages))
    }
}

/// Compose the exposed accessibility value.
///
/// With a page name the result is `"{name} - {underlying}"`; without one
/// the underlying value passes through unchanged, or the empty string when
/// it is absent.
pub fn compose_value(name: Option<&str>, underlying: Option<&str>) -> String {
    match (name, underlying) {
        (Some(name), Some(underlying)) => format!("{} - {}", name, underlying),
        (Some(name), None) => format!("{} - ", name),
        (None, Some(underlying)) => String::from(underlying),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_page_prefixes_underlying_value() {
        assert_eq!(compose_value(Some("Intro"), Some("1 of 3")), "Intro - 1 of 3");
    }

    #[test]
    fn unnamed_page_passes_value_through() {
        assert_eq!(compose_value(None, Some("2 of 3")), "2 of 3");
    }

    #[test]
    fn absent_value_yields_empty_string() {
        assert_eq!(compose_value(None, None), "");
    }

    #[test]
    fn mirror_counts_from_one() {
        let mut mirror = AccessibilityMirror::new();
        mirror.set_pages(3);
        mirror.set_current(1);
        assert_eq!(mirror.underlying_value().unwrap(), "2 of 3");
    }

    #[test]
    fn mirror_without_pages_has_no_value() {
        assert_eq!(AccessibilityMirror::new().underlying_value(), None);
    }

    #[test]
    fn set_pages_resets_current() {
        let mut mirror = AccessibilityMirror::new();
        mirror.set_pages(5);
        mirror.set_current(4);
        mirror.set_pages(3);
        assert_eq!(mirror.current(), 0);
    }

    #[test]
    fn out_of_range_current_is_ignored() {
        let mut mirror = AccessibilityMirror::new();
        mirror.set_pages(2);
        mirror.set_current(7);
        assert_eq!(mirror.current(), 0);
    }
}
