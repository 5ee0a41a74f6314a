//! The page-pair comparison run.
//!
//! [`compare`] opens both documents, walks their pages in lockstep, plans
//! highlights with the functional core and paints them through the
//! [`Compositor`]. Progress is reported to a [`CompareObserver`]; nothing is
//! printed from here.

use std::path::{Path, PathBuf};

use pdfdiff_core::highlight::{plan_page_highlights, PagePlanInput};
use pdfdiff_core::italic::ItalicFilter;
use pdfdiff_core::matcher::DEFAULT_TOLERANCE;
use pdfdiff_core::naming::resolve_output_path;
use pdfdiff_core::observer::{CompareEvent, CompareObserver, LogObserver};
use pdfdiff_core::page::{OutputLayout, PageSize};
use pdfdiff_core::summary::{CompareSummary, PageStats};
use pdfdiff_core::words::estimate_page_words;
use pdfdiff_core::{Side, StructuredPage, WordRecord};

use crate::compose::{Compositor, ImportedPage, Placement};
use crate::parser::backend::{LopdfBackend, PageId, PdfBackend};
use crate::parser::layout::extract_structured_page;
use crate::{CompareError, PdfError};

const PRODUCER: &str = concat!("pdfdiff ", env!("CARGO_PKG_VERSION"));

/// Settings for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    /// Where to write the result. Defaults to a timestamped file in the
    /// working directory.
    pub output: Option<PathBuf>,
    /// Italic words to highlight in blue, matched case-insensitively.
    pub italic_words: Vec<String>,
    /// Maximum block-number distance for two words to match.
    pub tolerance: u32,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            output: None,
            italic_words: Vec::new(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl CompareOptions {
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_italic_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.italic_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn italic_filter(&self) -> ItalicFilter {
        ItalicFilter::new(&self.italic_words)
    }
}

/// One opened input document.
pub struct SourceDocument {
    path: PathBuf,
    backend: LopdfBackend,
    pages: Vec<PageId>,
}

impl SourceDocument {
    /// Open and parse a PDF. Missing, unreadable, non-PDF and encrypted
    /// files are rejected; a document without pages is accepted.
    pub fn open(path: &Path) -> Result<Self, CompareError> {
        let backend = LopdfBackend::load(path).map_err(|e| CompareError::DocumentOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let pages: Vec<PageId> = backend.pages().into_values().collect();

        Ok(Self {
            path: path.to_path_buf(),
            backend,
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in the output's document information.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<PageId> {
        self.pages.get(index).copied()
    }

    pub fn page_size(&self, index: usize) -> Option<PageSize> {
        let page = self.page(index)?;
        let (width, height) = self.backend.page_dimensions(page);
        Some(PageSize::new(width, height))
    }

    /// Structured text of the page at `index` (0-based).
    pub fn extract_page(&self, index: usize) -> Result<StructuredPage, CompareError> {
        let extraction_error = |reason: String| CompareError::Extraction {
            page: index,
            reason,
        };
        let page = self
            .page(index)
            .ok_or_else(|| extraction_error("page does not exist".to_string()))?;
        extract_structured_page(&self.backend, page).map_err(|e| extraction_error(e.to_string()))
    }
}

/// The two documents of a run.
pub struct DocumentPair {
    pub first: SourceDocument,
    pub second: SourceDocument,
}

impl DocumentPair {
    /// Open both documents. One of them may be empty, not both.
    pub fn open(path_a: &Path, path_b: &Path) -> Result<Self, CompareError> {
        let pair = Self {
            first: SourceDocument::open(path_a)?,
            second: SourceDocument::open(path_b)?,
        };
        if pair.page_count() == 0 {
            return Err(CompareError::DocumentOpen {
                path: pair.first.path().to_path_buf(),
                reason: format!(
                    "neither this document nor {} has any pages",
                    pair.second.path().display()
                ),
            });
        }
        Ok(pair)
    }

    pub fn get(&self, side: Side) -> &SourceDocument {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    /// Number of output pages: the longer of the two documents.
    pub fn page_count(&self) -> usize {
        self.first.page_count().max(self.second.page_count())
    }

    /// Slot geometry from the first page of each document.
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::from_first_pages(self.first.page_size(0), self.second.page_size(0))
    }
}

/// Compare two PDFs and write the highlighted side-by-side result.
pub fn compare(
    path_a: &Path,
    path_b: &Path,
    options: &CompareOptions,
    observer: &dyn CompareObserver,
) -> Result<CompareSummary, CompareError> {
    let output = resolve_output_path(options.output.clone(), &chrono::Local::now());
    observer.on_event(&CompareEvent::OutputPlanned {
        path: output.clone(),
    });

    let pair = DocumentPair::open(path_a, path_b)?;
    let layout = pair.layout();
    let filter = options.italic_filter();
    let count = pair.page_count();
    observer.on_event(&CompareEvent::PagesPlanned {
        count,
        pages_a: pair.first.page_count(),
        pages_b: pair.second.page_count(),
    });

    let mut compositor = Compositor::new();
    compositor.set_info(
        PRODUCER,
        &pair.first.display_name(),
        &pair.second.display_name(),
    );

    let run = PageRun {
        pair: &pair,
        layout,
        tolerance: options.tolerance,
        filter: &filter,
        observer,
    };

    let mut pages = Vec::with_capacity(count);
    for index in 0..count {
        observer.on_event(&CompareEvent::PageStarted { index });
        let stats = run.process_page(&mut compositor, index)?;
        observer.on_event(&CompareEvent::PageFinished {
            index,
            stats: stats.clone(),
        });
        pages.push(stats);
    }

    observer.on_event(&CompareEvent::Saving {
        path: output.clone(),
    });
    compositor
        .save_atomic(&output)
        .map_err(|e| write_error(&output, e))?;

    let summary = CompareSummary {
        output,
        pages_a: pair.first.page_count(),
        pages_b: pair.second.page_count(),
        pages,
    };
    observer.on_event(&CompareEvent::Finished {
        summary: summary.clone(),
    });
    Ok(summary)
}

/// [`compare`] with default options, logging through the `log` facade.
pub fn compare_pdfs(path_a: &Path, path_b: &Path) -> Result<CompareSummary, CompareError> {
    compare(path_a, path_b, &CompareOptions::default(), &LogObserver)
}

fn write_error(path: &Path, err: PdfError) -> CompareError {
    match err {
        PdfError::Io(source) => CompareError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => CompareError::Composition {
            reason: other.to_string(),
        },
    }
}

fn composition_error(err: PdfError) -> CompareError {
    CompareError::Composition {
        reason: err.to_string(),
    }
}

fn words_of(page: &Option<SidePage>) -> &[WordRecord] {
    page.as_ref().map(|p| p.words.as_slice()).unwrap_or(&[])
}

/// Per-run state shared by every page.
struct PageRun<'a> {
    pair: &'a DocumentPair,
    layout: OutputLayout,
    tolerance: u32,
    filter: &'a ItalicFilter,
    observer: &'a dyn CompareObserver,
}

/// One side of one page pair.
struct SidePage {
    imported: ImportedPage,
    words: Vec<WordRecord>,
}

impl PageRun<'_> {
    fn process_page(
        &self,
        compositor: &mut Compositor,
        index: usize,
    ) -> Result<PageStats, CompareError> {
        let a = self.load_side(compositor, Side::First, index);
        let b = self.load_side(compositor, Side::Second, index);

        let offset = |side: Side, page: &Option<SidePage>| {
            page.as_ref()
                .map(|p| self.layout.offset(side, p.imported.size().height))
                .unwrap_or_default()
        };
        let plan = plan_page_highlights(&PagePlanInput {
            words_a: words_of(&a),
            words_b: words_of(&b),
            offset_a: offset(Side::First, &a),
            offset_b: offset(Side::Second, &b),
            tolerance: self.tolerance,
            italic_filter: self.filter,
        });

        for (side, text) in &plan.italic_words {
            self.observer.on_event(&CompareEvent::ItalicWord {
                side: *side,
                page: index,
                text: text.clone(),
            });
        }

        let placements: Vec<Placement> = [(Side::First, &a), (Side::Second, &b)]
            .into_iter()
            .filter_map(|(side, page)| {
                page.as_ref().map(|p| Placement {
                    page: p.imported,
                    offset: offset(side, page),
                })
            })
            .collect();

        compositor
            .add_page(self.layout.page_size(), &placements, &plan.highlights)
            .map_err(composition_error)?;

        Ok(plan.stats)
    }

    /// Estimate the words of the page at `index` of one side and import it.
    /// A side without that page yields `None`; a page whose text cannot be
    /// extracted yields no words but is still imported.
    fn load_side(&self, compositor: &mut Compositor, side: Side, index: usize) -> Option<SidePage> {
        let doc = self.pair.get(side);
        let page = doc.page(index)?;

        let words = match doc.extract_page(index) {
            Ok(structured) => estimate_page_words(&structured),
            Err(err) => {
                self.observer.on_event(&CompareEvent::ExtractionDegraded {
                    side,
                    page: index,
                    reason: err.to_string(),
                });
                Vec::new()
            }
        };
        let imported = compositor.import_page(side, &doc.backend, page);

        Some(SidePage { imported, words })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use lopdf::{Document, Object};
    use pdfdiff_core::observer::NullObserver;

    use super::*;
    use crate::fixtures::{
        break_media_box, build_pdf, single_line_pages, write_pdf, FixturePage, FixtureText,
    };

    const EPS: f32 = 0.01;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<CompareEvent>>,
    }

    impl CompareObserver for Recorder {
        fn on_event(&self, event: &CompareEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    struct Annotation {
        rect: Vec<f32>,
        color: Vec<f32>,
    }

    fn numbers(obj: &Object) -> Vec<f32> {
        obj.as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect()
    }

    fn annotations(doc: &Document, page: u32) -> Vec<Annotation> {
        let page_id = doc.get_pages()[&page];
        let dict = doc.get_dictionary(page_id).unwrap();
        let Ok(annots) = dict.get(b"Annots").and_then(|a| a.as_array()) else {
            return Vec::new();
        };
        annots
            .iter()
            .map(|a| {
                let annot = doc.get_dictionary(a.as_reference().unwrap()).unwrap();
                assert_eq!(
                    annot.get(b"Subtype").unwrap().as_name().unwrap(),
                    b"Highlight"
                );
                Annotation {
                    rect: numbers(annot.get(b"Rect").unwrap()),
                    color: numbers(annot.get(b"C").unwrap()),
                }
            })
            .collect()
    }

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_quick_fox_vs_slow_fox() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(dir.path(), "a.pdf", &single_line_pages(&["The quick fox"]));
        let b = write_pdf(dir.path(), "b.pdf", &single_line_pages(&["The slow fox"]));
        let out = dir.path().join("out.pdf");

        let summary = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap();
        assert_eq!(summary.output, out);
        assert_eq!(summary.page_count(), 1);
        assert_eq!(summary.total_only_in_first(), 1);
        assert_eq!(summary.total_only_in_second(), 1);
        assert_eq!(summary.pages[0].words_a, 3);

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let page_id = doc.get_pages()[&1];
        let media_box = numbers(
            doc.get_dictionary(page_id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap(),
        );
        assert_close(&media_box, &[0.0, 0.0, 1224.0, 792.0]);

        let annots = annotations(&doc, 1);
        assert_eq!(annots.len(), 2);
        // "quick" on the left
        assert_close(&annots[0].rect, &[96.0, 717.6, 126.0, 729.6]);
        assert_close(&annots[0].color, &[1.0, 0.0, 0.0]);
        // "slow" on the right, shifted by the slot width
        assert_close(&annots[1].rect, &[708.0, 717.6, 732.0, 729.6]);
        assert_close(&annots[1].color, &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_identical_documents_have_no_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let pages = single_line_pages(&["same words here", "and on page two"]);
        let a = write_pdf(dir.path(), "a.pdf", &pages);
        let b = write_pdf(dir.path(), "b.pdf", &pages);
        let out = dir.path().join("out.pdf");

        let summary = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap();
        assert!(summary.is_identical());
        assert!(summary.pages.iter().all(|p| p.compared));

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(annotations(&doc, 1).is_empty());
        assert!(annotations(&doc, 2).is_empty());
    }

    #[test]
    fn test_uneven_page_counts() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(
            dir.path(),
            "a.pdf",
            &single_line_pages(&["first page", "second page", "third page"]),
        );
        let b = write_pdf(dir.path(), "b.pdf", &single_line_pages(&["first page"]));
        let out = dir.path().join("out.pdf");

        let summary = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap();
        assert_eq!(summary.pages_a, 3);
        assert_eq!(summary.pages_b, 1);
        assert_eq!(summary.page_count(), 3);
        assert!(!summary.pages[1].compared);
        assert!(!summary.pages[2].compared);

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        assert!(annotations(&doc, 2).is_empty());
        assert!(annotations(&doc, 3).is_empty());
    }

    #[test]
    fn test_italic_words_of_interest() {
        let dir = tempfile::tempdir().unwrap();
        let page = FixturePage::new(vec![
            FixtureText::new("see", 72.0, 720.0),
            FixtureText::new("ibid", 120.0, 720.0).italic(),
        ]);
        let a = write_pdf(dir.path(), "a.pdf", &[page.clone()]);
        let b = write_pdf(dir.path(), "b.pdf", &[page]);
        let out = dir.path().join("out.pdf");

        let recorder = Recorder::default();
        let summary = compare(
            &a,
            &b,
            &CompareOptions::default()
                .with_output(&out)
                .with_italic_words(["IBID"]),
            &recorder,
        )
        .unwrap();
        assert!(summary.is_identical());
        assert_eq!(summary.total_italic(), 2);

        let doc = Document::load(&out).unwrap();
        let annots = annotations(&doc, 1);
        assert_eq!(annots.len(), 2);
        assert!(annots.iter().all(|a| a.color == vec![0.0, 0.0, 1.0]));
        assert!(annots[1].rect[0] > 612.0);

        let italic_events = recorder
            .events
            .borrow()
            .iter()
            .filter(|e| matches!(e, CompareEvent::ItalicWord { .. }))
            .count();
        assert_eq!(italic_events, 2);
    }

    #[test]
    fn test_non_pdf_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        std::fs::write(&a, b"this is not a pdf").unwrap();
        let b = write_pdf(dir.path(), "b.pdf", &single_line_pages(&["text"]));
        let out = dir.path().join("out.pdf");

        let err = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap_err();
        match err {
            CompareError::DocumentOpen { path, .. } => assert_eq!(path, a),
            other => panic!("expected DocumentOpen, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(dir.path(), "a.pdf", &single_line_pages(&["text"]));
        let missing = dir.path().join("missing.pdf");
        let out = dir.path().join("out.pdf");

        let err = compare(
            &a,
            &missing,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap_err();
        assert!(matches!(err, CompareError::DocumentOpen { ref path, .. } if *path == missing));
        assert!(!out.exists());
    }

    #[test]
    fn test_unwritable_output_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(dir.path(), "a.pdf", &single_line_pages(&["text"]));
        let out = dir.path().join("no-such-dir").join("out.pdf");

        let err = compare(
            &a,
            &a,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap_err();
        assert!(matches!(err, CompareError::Io { .. }));
    }

    #[test]
    fn test_tolerance_zero_requires_same_block() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(
            dir.path(),
            "a.pdf",
            &[FixturePage::new(vec![
                FixtureText::new("intro", 72.0, 720.0),
                FixtureText::new("moved", 72.0, 600.0),
            ])],
        );
        let b = write_pdf(
            dir.path(),
            "b.pdf",
            &[FixturePage::new(vec![FixtureText::new("moved", 72.0, 720.0)])],
        );
        let out = dir.path().join("out.pdf");

        let default = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap();
        assert_eq!(default.total_only_in_first(), 1);
        assert_eq!(default.total_only_in_second(), 0);

        let strict = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out).with_tolerance(0),
            &NullObserver,
        )
        .unwrap();
        assert_eq!(strict.total_only_in_first(), 2);
        assert_eq!(strict.total_only_in_second(), 1);
    }

    #[test]
    fn test_events_bracket_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(dir.path(), "a.pdf", &single_line_pages(&["x", "y"]));
        let out = dir.path().join("out.pdf");

        let recorder = Recorder::default();
        compare(
            &a,
            &a,
            &CompareOptions::default().with_output(&out),
            &recorder,
        )
        .unwrap();

        let events = recorder.events.borrow();
        assert!(matches!(events.first(), Some(CompareEvent::OutputPlanned { .. })));
        assert!(matches!(events.last(), Some(CompareEvent::Finished { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, CompareEvent::PagesPlanned { count: 2, .. })));
        let finished = events
            .iter()
            .filter(|e| matches!(e, CompareEvent::PageFinished { .. }))
            .count();
        assert_eq!(finished, 2);
    }

    #[test]
    fn test_page_size_from_first_pages_only() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(
            dir.path(),
            "a.pdf",
            &[
                FixturePage::new(vec![FixtureText::new("small", 10.0, 300.0)])
                    .with_media_box([0.0, 0.0, 300.0, 400.0]),
                FixturePage::new(vec![FixtureText::new("huge", 10.0, 300.0)])
                    .with_media_box([0.0, 0.0, 900.0, 900.0]),
            ],
        );
        let b = write_pdf(
            dir.path(),
            "b.pdf",
            &[FixturePage::new(vec![FixtureText::new("small", 10.0, 300.0)])
                .with_media_box([0.0, 0.0, 500.0, 350.0])],
        );

        let pair = DocumentPair::open(&a, &b).unwrap();
        let layout = pair.layout();
        assert_eq!(layout.slot_width, 500.0);
        assert_eq!(layout.height, 400.0);
        assert_eq!(pair.page_count(), 2);
        assert_eq!(pair.get(Side::Second).display_name(), "b.pdf");
    }

    #[test]
    fn test_unreadable_page_degrades_instead_of_aborting() {
        let dir = tempfile::tempdir().unwrap();
        let pages = single_line_pages(&["first page", "second page"]);
        let a = dir.path().join("a.pdf");
        std::fs::write(&a, break_media_box(&build_pdf(&pages), 2)).unwrap();
        let b = write_pdf(dir.path(), "b.pdf", &pages);
        let out = dir.path().join("out.pdf");

        let source = SourceDocument::open(&a).unwrap();
        assert_eq!(source.page_count(), 2);
        assert!(source.extract_page(0).is_ok());
        assert!(matches!(
            source.extract_page(1),
            Err(CompareError::Extraction { page: 1, .. })
        ));
        assert!(matches!(
            source.extract_page(5),
            Err(CompareError::Extraction { page: 5, .. })
        ));
        assert_eq!(source.page_size(1), Some(PageSize::new(612.0, 792.0)));

        let recorder = Recorder::default();
        let summary = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &recorder,
        )
        .unwrap();
        assert_eq!(summary.page_count(), 2);
        assert!(summary.pages[0].compared);
        assert!(!summary.pages[1].compared);
        assert_eq!(summary.pages[1].words_a, 0);
        assert_eq!(summary.pages[1].words_b, 2);

        let degraded: Vec<_> = recorder
            .events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                CompareEvent::ExtractionDegraded { side, page, .. } => Some((*side, *page)),
                _ => None,
            })
            .collect();
        assert_eq!(degraded, vec![(Side::First, 1)]);

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(annotations(&doc, 2).is_empty());
    }

    #[test]
    fn test_empty_document_is_compared_against_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(dir.path(), "a.pdf", &[]);
        let b = write_pdf(dir.path(), "b.pdf", &single_line_pages(&["only here"]));
        let out = dir.path().join("out.pdf");

        let summary = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap();
        assert_eq!(summary.pages_a, 0);
        assert_eq!(summary.pages_b, 1);
        assert_eq!(summary.page_count(), 1);
        assert!(!summary.pages[0].compared);
        assert_eq!(summary.total_only_in_second(), 0);

        let doc = Document::load(&out).unwrap();
        let page_id = doc.get_pages()[&1];
        let media_box = numbers(
            doc.get_dictionary(page_id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap(),
        );
        assert_close(&media_box, &[0.0, 0.0, 1224.0, 792.0]);
        assert!(annotations(&doc, 1).is_empty());
    }

    #[test]
    fn test_two_empty_documents_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_pdf(dir.path(), "a.pdf", &[]);
        let b = write_pdf(dir.path(), "b.pdf", &[]);
        let out = dir.path().join("out.pdf");

        let err = compare(
            &a,
            &b,
            &CompareOptions::default().with_output(&out),
            &NullObserver,
        )
        .unwrap_err();
        assert!(matches!(err, CompareError::DocumentOpen { ref path, .. } if *path == a));
        assert!(!out.exists());
    }

    #[test]
    fn test_options_builders() {
        let options = CompareOptions::default()
            .with_italic_words(vec!["Et Al".to_string(), " ".to_string()])
            .with_tolerance(2);
        assert_eq!(options.tolerance, 2);
        let filter = options.italic_filter();
        assert_eq!(filter.len(), 1);
        assert!(filter.contains("et al"));
        assert_eq!(CompareOptions::default().tolerance, 5);
        assert!(CompareOptions::default().output.is_none());
    }
}
