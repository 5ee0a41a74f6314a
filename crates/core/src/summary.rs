//! Run summary, per-page statistics and the color legend.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::HighlightKind;

/// Counts gathered while planning one output page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStats {
    pub words_a: usize,
    pub words_b: usize,
    pub only_in_first: usize,
    pub only_in_second: usize,
    pub italic: usize,
    /// `false` when one side had no words and the page was copied as-is.
    pub compared: bool,
}

impl PageStats {
    pub fn highlight_count(&self) -> usize {
        self.only_in_first + self.only_in_second + self.italic
    }
}

/// What a finished comparison run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSummary {
    pub output: PathBuf,
    pub pages_a: usize,
    pub pages_b: usize,
    pub pages: Vec<PageStats>,
}

impl CompareSummary {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn total_only_in_first(&self) -> usize {
        self.pages.iter().map(|p| p.only_in_first).sum()
    }

    pub fn total_only_in_second(&self) -> usize {
        self.pages.iter().map(|p| p.only_in_second).sum()
    }

    pub fn total_italic(&self) -> usize {
        self.pages.iter().map(|p| p.italic).sum()
    }

    /// `true` when no red or green highlight was produced.
    pub fn is_identical(&self) -> bool {
        self.total_only_in_first() == 0 && self.total_only_in_second() == 0
    }
}

/// One legend line: which highlight color means what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub kind: HighlightKind,
    pub label: &'static str,
    pub description: &'static str,
}

pub const LEGEND: [LegendEntry; 3] = [
    LegendEntry {
        kind: HighlightKind::OnlyInFirst,
        label: "Red",
        description: "Content only in first PDF",
    },
    LegendEntry {
        kind: HighlightKind::OnlyInSecond,
        label: "Green",
        description: "Content only in second PDF",
    },
    LegendEntry {
        kind: HighlightKind::ItalicOfInterest,
        label: "Blue",
        description: "Italic words of interest",
    },
];

/// Legend entries relevant to a run. The italic entry is only listed when
/// an italic filter was in effect.
pub fn legend(with_italic: bool) -> impl Iterator<Item = &'static LegendEntry> {
    LEGEND
        .iter()
        .filter(move |e| with_italic || e.kind != HighlightKind::ItalicOfInterest)
}
