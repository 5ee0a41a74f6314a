//! Diagnostic events emitted during a comparison run.
//!
//! The orchestrator never prints. It reports progress through a
//! [`CompareObserver`] supplied by the caller; [`LogObserver`] forwards every
//! event to the `log` facade and is what the CLI uses.

use std::path::PathBuf;

use crate::summary::{CompareSummary, PageStats};
use crate::types::Side;

/// Something worth reporting while a comparison runs.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareEvent {
    /// The output path has been decided.
    OutputPlanned { path: PathBuf },
    /// Both documents are open; `count` output pages will be produced.
    PagesPlanned {
        count: usize,
        pages_a: usize,
        pages_b: usize,
    },
    PageStarted { index: usize },
    /// An italic word was found on a compared page.
    ItalicWord { side: Side, page: usize, text: String },
    /// Text could not be extracted; the page is treated as having no words.
    ExtractionDegraded {
        side: Side,
        page: usize,
        reason: String,
    },
    PageFinished { index: usize, stats: PageStats },
    Saving { path: PathBuf },
    Finished { summary: CompareSummary },
}

/// Receives [`CompareEvent`]s.
pub trait CompareObserver {
    fn on_event(&self, event: &CompareEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl CompareObserver for LogObserver {
    fn on_event(&self, event: &CompareEvent) {
        match event {
            CompareEvent::OutputPlanned { path } => {
                log::info!("Output will be saved as: {}", path.display());
            }
            CompareEvent::PagesPlanned {
                count,
                pages_a,
                pages_b,
            } => {
                log::info!("Processing {count} pages ({pages_a} vs {pages_b})...");
            }
            CompareEvent::PageStarted { index } => {
                log::debug!("Processing page {}", index + 1);
            }
            CompareEvent::ItalicWord { side, page, text } => {
                log::debug!("Found italic word in {side} page {}: {text}", page + 1);
            }
            CompareEvent::ExtractionDegraded { side, page, reason } => {
                log::warn!(
                    "Could not extract text from {side} page {}: {reason}",
                    page + 1
                );
            }
            CompareEvent::PageFinished { index, stats } => {
                log::debug!(
                    "Page {}: {} red, {} green, {} blue",
                    index + 1,
                    stats.only_in_first,
                    stats.only_in_second,
                    stats.italic
                );
            }
            CompareEvent::Saving { path } => {
                log::info!("Saving comparison result to {}", path.display());
            }
            CompareEvent::Finished { summary } => {
                log::info!(
                    "Comparison finished: {} pages, {} only in first, {} only in second",
                    summary.page_count(),
                    summary.total_only_in_first(),
                    summary.total_only_in_second()
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl CompareObserver for NullObserver {
    fn on_event(&self, _event: &CompareEvent) {}
}
