//! Per-page highlight planning.
//!
//! Turns the word lists of one page pair into the [`HighlightSpec`]s the
//! compositor paints:
//!
//! - red for first-document words with no match in the second,
//! - green for second-document words with no match in the first,
//! - blue for italic words on either side that appear in the
//!   [`ItalicFilter`], regardless of match status.
//!
//! Comparison only happens when both sides have words. A page that is blank
//! or missing on one side gets no highlights at all.

use crate::italic::ItalicFilter;
use crate::matcher::find_match;
use crate::summary::PageStats;
use crate::types::{HighlightKind, HighlightSpec, Side, WordRecord};

/// Everything needed to plan one output page.
#[derive(Debug, Clone, Copy)]
pub struct PagePlanInput<'a> {
    pub words_a: &'a [WordRecord],
    pub words_b: &'a [WordRecord],
    /// Translation from first-document page space to output page space.
    pub offset_a: (f32, f32),
    /// Translation from second-document page space to output page space.
    pub offset_b: (f32, f32),
    pub tolerance: u32,
    pub italic_filter: &'a ItalicFilter,
}

/// The highlights for one output page plus what was observed while planning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub highlights: Vec<HighlightSpec>,
    /// Every italic word seen on a compared page, in encounter order.
    pub italic_words: Vec<(Side, String)>,
    pub stats: PageStats,
}

/// Plan the highlights for one page pair.
///
/// Highlights are emitted per side in word order: for each first-document
/// word its red highlight (if unmatched) then its blue one (if of interest),
/// then the same for the second document with green.
pub fn plan_page_highlights(input: &PagePlanInput<'_>) -> PagePlan {
    let mut plan = PagePlan {
        stats: PageStats {
            words_a: input.words_a.len(),
            words_b: input.words_b.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    if input.words_a.is_empty() || input.words_b.is_empty() {
        return plan;
    }
    plan.stats.compared = true;

    plan_side(
        &mut plan,
        Side::First,
        input.words_a,
        input.words_b,
        input.offset_a,
        input,
    );
    plan_side(
        &mut plan,
        Side::Second,
        input.words_b,
        input.words_a,
        input.offset_b,
        input,
    );

    plan
}

fn plan_side(
    plan: &mut PagePlan,
    side: Side,
    words: &[WordRecord],
    other: &[WordRecord],
    (dx, dy): (f32, f32),
    input: &PagePlanInput<'_>,
) {
    let unmatched_kind = match side {
        Side::First => HighlightKind::OnlyInFirst,
        Side::Second => HighlightKind::OnlyInSecond,
    };

    for word in words {
        let rect = word.bbox.translate(dx, dy);

        if word.is_italic {
            plan.italic_words.push((side, word.text.clone()));
        }

        if !find_match(&word.text, word.block_number, other, input.tolerance) {
            plan.highlights.push(HighlightSpec::new(unmatched_kind, rect));
            match side {
                Side::First => plan.stats.only_in_first += 1,
                Side::Second => plan.stats.only_in_second += 1,
            }
        }

        if word.is_italic && input.italic_filter.contains(&word.text) {
            plan.highlights
                .push(HighlightSpec::new(HighlightKind::ItalicOfInterest, rect));
            plan.stats.italic += 1;
        }
    }
}
