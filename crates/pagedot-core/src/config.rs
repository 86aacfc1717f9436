//! Serializable appearance configuration.
//!
//! Plain-old-data snapshot of everything about the widget a host might
//! want to persist. Tint colors travel as raw RGB565 words so the struct
//! stays free of display types.

use serde::{Deserialize, Serialize};

use crate::layout::{
    Alignment, DEFAULT_INDICATOR_DIAMETER, DEFAULT_INDICATOR_MARGIN, VerticalAlignment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageControlConfig {
    pub indicator_diameter: u32,
    pub indicator_margin: u32,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
    pub hides_for_single_page: bool,
    pub defers_current_page_display: bool,
    /// Raw RGB565 word; `None` selects the built-in fallback color.
    pub page_indicator_tint: Option<u16>,
    /// Raw RGB565 word; `None` selects the built-in fallback color.
    pub current_page_indicator_tint: Option<u16>,
}

impl Default for PageControlConfig {
    fn default() -> Self {
        Self {
            indicator_diameter: DEFAULT_INDICATOR_DIAMETER,
            indicator_margin: DEFAULT_INDICATOR_MARGIN,
            alignment: Alignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            hides_for_single_page: false,
            defers_current_page_display: false,
            page_indicator_tint: None,
            current_page_indicator_tint: None,
        }
    }
}
