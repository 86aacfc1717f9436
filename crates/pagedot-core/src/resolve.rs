//! Indicator visual-source resolution.
//!
//! Each indicator can be backed by one of several overlapping sources:
//! per-page images, global default images, per-page masks, a global mask,
//! or the plain tinted dot. The precedence between them is fixed and lives
//! here as a standalone function over [`IndicatorSources`], so it can be
//! tested without a widget or a display.
//!
//! Precedence, first match wins:
//!
//! 1. Per-page image for the matching state
//! 2. Global default image for the matching state
//! 3. Per-page mask (state-independent)
//! 4. Global default mask (state-independent)
//! 5. Solid dot of the configured diameter
//!
//! A mask-source entry without its paired derived mask is treated as if
//! the mask were absent; resolution falls through to the next tier.

extern crate alloc;

use alloc::collections::BTreeMap;
use embedded_graphics::prelude::*;

use crate::bitmap::{Bitmap, Mask};

/// Whether an indicator represents the displayed page or any other page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Normal,
    Current,
}

/// The visual representation chosen for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedIndicator<'a> {
    /// A finished image, drawn as-is
    Image(&'a Bitmap),
    /// A derived mask painted with the state's tint color.
    ///
    /// `size` comes from the mask's source image and drives positioning.
    Masked { mask: &'a Mask, size: Size },
    /// Tinted dot of the configured diameter
    Dot { diameter: u32 },
}

/// Borrowed view over every visual-source slot the resolver consults.
pub struct IndicatorSources<'a> {
    pub page_images: &'a BTreeMap<usize, Bitmap>,
    pub current_page_images: &'a BTreeMap<usize, Bitmap>,
    pub page_mask_sources: &'a BTreeMap<usize, Bitmap>,
    pub derived_page_masks: &'a BTreeMap<usize, Mask>,
    pub global_image: Option<&'a Bitmap>,
    pub global_current_image: Option<&'a Bitmap>,
    pub global_mask_source: Option<&'a Bitmap>,
    pub global_derived_mask: Option<&'a Mask>,
}

/// Pick the visual source for `page` in `state`.
///
/// Never fails: the final tier (the dot) always applies.
pub fn resolve<'a>(
    sources: &IndicatorSources<'a>,
    page: usize,
    state: IndicatorState,
    diameter: u32,
) -> ResolvedIndicator<'a> {
    let image = match state {
        IndicatorState::Current => sources
            .current_page_images
            .get(&page)
            .or(sources.global_current_image),
        IndicatorState::Normal => sources.page_images.get(&page).or(sources.global_image),
    };

    if let Some(image) = image {
        return ResolvedIndicator::Image(image);
    }

    // No finished image; masks apply regardless of state.
    if let Some(mask) = sources.derived_page_masks.get(&page) {
        let size = sources
            .page_mask_sources
            .get(&page)
            .map_or_else(|| mask.size(), OriginDimensions::size);
        return ResolvedIndicator::Masked { mask, size };
    }

    if let Some(mask) = sources.global_derived_mask {
        let size = sources
            .global_mask_source
            .map_or_else(|| mask.size(), OriginDimensions::size);
        return ResolvedIndicator::Masked { mask, size };
    }

    ResolvedIndicator::Dot { diameter }
}
