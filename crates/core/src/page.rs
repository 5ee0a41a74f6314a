//! Output page geometry.
//!
//! Every output page is two slots wide. The slot size is taken from the
//! first page of each input document only and reused for all output pages,
//! so documents whose later pages differ in size are not re-measured.

use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Width and height of a page in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        PageSize { width, height }
    }
}

/// Slot dimensions shared by every page of one output document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputLayout {
    pub slot_width: f32,
    pub height: f32,
}

impl OutputLayout {
    /// Size the layout from the first page of each document. A missing first
    /// page (empty document) contributes zero.
    pub fn from_first_pages(first_a: Option<PageSize>, first_b: Option<PageSize>) -> Self {
        let a = first_a.unwrap_or_default();
        let b = first_b.unwrap_or_default();
        OutputLayout {
            slot_width: a.width.max(b.width),
            height: a.height.max(b.height),
        }
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.slot_width * 2.0, self.height)
    }

    /// Translation applied to a source page of height `source_height` drawn
    /// into `side`'s slot. Pages are drawn unscaled and top-aligned.
    pub fn offset(&self, side: Side, source_height: f32) -> (f32, f32) {
        let dx = match side {
            Side::First => 0.0,
            Side::Second => self.slot_width,
        };
        (dx, self.height - source_height)
    }
}
