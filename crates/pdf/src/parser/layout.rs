//! Structured text extraction: content-stream operators to a
//! block -> line -> span tree.
//!
//! Every function here is a pure transformation over data provided by a
//! [`PdfBackend`]; the backend owns all I/O.
//!
//! # Pipeline
//!
//! ```text
//! content ops  ->  TextRun[]  ->  RunLine[]  ->  blocks  ->  StructuredPage
//!   (per page)     extract        group_runs      group_lines  build
//!                  cleanup
//! ```
//!
//! Positions are tracked through both the text matrix and the current
//! transformation matrix (`q`/`Q`/`cm`), so runs are placed in page space.
//! The resulting boxes are relative to the page's MediaBox origin.

use pdfdiff_core::{BBox, Span, StructuredPage, TextBlock, TextLine};

use super::backend::{
    decode_text_simple, get_number_from_value, BackendFontInfo, FontWidths, PageId, PdfBackend,
    PdfValue,
};
use crate::text::cleanup::clean_run_text;
use crate::PdfError;

// ---------------------------------------------------------------------------
// Intermediate types
// ---------------------------------------------------------------------------

/// A single run of text as drawn by one show operator, in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Origin of the first glyph.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
}

impl TextRun {
    fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Runs sharing (approximately) one baseline, sorted left to right.
#[derive(Debug, Clone, Default)]
pub struct RunLine {
    pub runs: Vec<TextRun>,
    pub y: f32,
    pub font_size: f32,
}

impl RunLine {
    /// Horizontal extent `(left, right)` of the line.
    fn extent(&self) -> (f32, f32) {
        let left = self.runs.iter().map(|r| r.x).fold(f32::INFINITY, f32::min);
        let right = self
            .runs
            .iter()
            .map(TextRun::right)
            .fold(f32::NEG_INFINITY, f32::max);
        (left, right)
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Two runs whose baselines differ by at most this are on the same line.
const Y_TOLERANCE: f32 = 1.0;

/// Approximate character width as a fraction of font size when the font
/// carries no width table.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Minimum gap (in points) between adjacent runs before a space is inserted.
const MIN_WORD_GAP: f32 = 1.5;

/// Runs further apart than this multiple of the font size stay separate spans.
const MAX_MERGE_GAP_FACTOR: f32 = 2.0;

/// A vertical gap larger than this multiple of the line's font size starts a
/// new block.
const BLOCK_GAP_FACTOR: f32 = 1.4;

/// Font sizes closer than this are considered equal when merging runs.
const FONT_SIZE_EPSILON: f32 = 0.5;

/// Descent and ascent of the span box as fractions of the font size.
const DESCENT_RATIO: f32 = 0.2;
const ASCENT_RATIO: f32 = 0.8;

/// The identity 2x3 matrix: [a, b, c, d, e, f].
const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Product `m1 × m2` of two affine matrices in PDF `[a b c d e f]` form.
fn multiply(m1: &[f32; 6], m2: &[f32; 6]) -> [f32; 6] {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn numbers<const N: usize>(operands: &[PdfValue]) -> Option<[f32; N]> {
    if operands.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, val) in out.iter_mut().zip(operands) {
        *slot = get_number_from_value(val)?;
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// Internal: PDF text-state machine
// ---------------------------------------------------------------------------

/// Mutable state tracked while walking a page's content stream.
#[derive(Debug, Clone)]
struct TextState {
    /// Current font resource name (the `/F1`-style key).
    font_key: Vec<u8>,
    /// Resolved base-font name for the current font.
    font_name: String,
    font_widths: Option<FontWidths>,
    /// Font size in text-space units.
    font_size: f32,
    text_matrix: [f32; 6],
    /// Set by BT and updated by Td/TD/T*/Tm.
    line_matrix: [f32; 6],
    /// Current transformation matrix.
    ctm: [f32; 6],
    /// Saved CTMs for `q`/`Q`.
    ctm_stack: Vec<[f32; 6]>,
    /// Horizontal scaling factor (percent / 100).
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_name: String::new(),
            font_widths: None,
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            ctm: IDENTITY_MATRIX,
            ctm_stack: Vec::new(),
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    /// Text space to page space.
    fn rendering_matrix(&self) -> [f32; 6] {
        multiply(&self.text_matrix, &self.ctm)
    }

    /// Page-space position of the current glyph origin, including text rise.
    fn origin(&self) -> (f32, f32) {
        let m = self.rendering_matrix();
        (
            m[4] + self.text_rise * m[2],
            m[5] + self.text_rise * m[3],
        )
    }

    /// Rendered font size: `font_size` scaled by the vertical axis of the
    /// rendering matrix.
    fn effective_font_size(&self) -> f32 {
        let m = self.rendering_matrix();
        (self.font_size * (m[2].powi(2) + m[3].powi(2)).sqrt()).abs()
    }

    /// Page-space length of one text-space unit along the baseline.
    fn horizontal_scale(&self) -> f32 {
        let m = self.rendering_matrix();
        (m[0].powi(2) + m[1].powi(2)).sqrt()
    }

    /// Advance the text matrix horizontally by `dx` text-space units.
    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Multiply the text line matrix by a translation (used by Td / TD).
    fn translate_line(&mut self, tx: f32, ty: f32) {
        let new_tx = self.line_matrix[0] * tx + self.line_matrix[2] * ty + self.line_matrix[4];
        let new_ty = self.line_matrix[1] * tx + self.line_matrix[3] * ty + self.line_matrix[5];
        self.line_matrix[4] = new_tx;
        self.line_matrix[5] = new_ty;
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    fn set_font(&mut self, key: Vec<u8>, info: Option<&BackendFontInfo>, size: f32) {
        self.font_name = match info.and_then(|i| i.base_font.as_deref()) {
            Some(base) => base.to_string(),
            None => String::from_utf8_lossy(&key).into_owned(),
        };
        self.font_widths = info.and_then(|i| i.widths.clone());
        self.font_key = key;
        self.font_size = size;
    }

    /// Text-space advance of a single glyph, spacing included.
    fn glyph_advance(&self, ch: char) -> f32 {
        let w0 = self
            .font_widths
            .as_ref()
            .and_then(|w| w.get(ch as u32))
            .map(|w| w / 1000.0 * self.font_size)
            .unwrap_or(self.font_size * APPROX_CHAR_WIDTH_RATIO);
        let spacing = self.char_spacing + if ch == ' ' { self.word_spacing } else { 0.0 };
        (w0 + spacing) * self.horiz_scale
    }

    /// Advance the text matrix past `text` and return the page-space width
    /// that was covered.
    fn show(&mut self, text: &str) -> f32 {
        let dx: f32 = text.chars().map(|ch| self.glyph_advance(ch)).sum();
        let width = dx * self.horizontal_scale();
        self.advance_x(dx);
        width
    }
}

/// Resolve a font resource name to its [`BackendFontInfo`].
fn resolve_font<'a>(key: &[u8], fonts: &'a [BackendFontInfo]) -> Option<&'a BackendFontInfo> {
    fonts.iter().find(|info| info.name == key)
}

/// Decode a single [`PdfValue::Str`] operand using the backend's font-aware
/// decoder.
fn decode_string(
    val: &PdfValue,
    backend: &dyn PdfBackend,
    page_id: PageId,
    font_key: &[u8],
) -> String {
    match val {
        PdfValue::Str(bytes) => {
            let decoded = backend.decode_text(page_id, font_key, bytes);
            if decoded.is_empty() {
                decode_text_simple(bytes)
            } else {
                decoded
            }
        }
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Public API: run extraction
// ---------------------------------------------------------------------------

/// Walk a page's content stream and produce its text runs in drawing order.
///
/// Handled operators:
///
/// | Operator | Action |
/// |----------|--------|
/// | `q` / `Q` | Save / restore the CTM |
/// | `cm`     | Concatenate to the CTM |
/// | `BT`     | Begin text object, reset matrices |
/// | `Tf`     | Set font and size |
/// | `Tm`     | Set text matrix directly |
/// | `Td` / `TD` / `T*` | Move to the next line |
/// | `TL` `Tc` `Tw` `Tz` `Ts` | Text state parameters |
/// | `Tj` / `TJ` / `'` / `"` | Show text |
///
/// Run text is cleaned with [`clean_run_text`]; runs that are empty or
/// whitespace-only after cleaning are dropped.
pub fn extract_page_runs(
    backend: &dyn PdfBackend,
    page_id: PageId,
) -> Result<Vec<TextRun>, PdfError> {
    let raw_content = backend.page_content(page_id)?;
    let ops = backend.decode_content(&raw_content)?;
    let fonts = backend.page_fonts(page_id).unwrap_or_default();

    let mut state = TextState::default();
    let mut runs: Vec<TextRun> = Vec::new();

    for op in &ops {
        match op.operator.as_str() {
            // -- Graphics state -----------------------------------------
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = numbers::<6>(&op.operands) {
                    state.ctm = multiply(&m, &state.ctm);
                }
            }

            // -- Text objects -------------------------------------------
            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "ET" => {}

            "Tf" => handle_tf(&op.operands, &fonts, &mut state),

            // -- Text position ------------------------------------------
            "Tm" => {
                if let Some(m) = numbers::<6>(&op.operands) {
                    state.text_matrix = m;
                    state.line_matrix = m;
                }
            }
            "Td" => {
                if let Some([tx, ty]) = numbers::<2>(&op.operands) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers::<2>(&op.operands) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "TL" => {
                if let Some([v]) = numbers::<1>(&op.operands) {
                    state.leading = v;
                }
            }

            // -- Spacing / scaling --------------------------------------
            "Tc" => {
                if let Some([v]) = numbers::<1>(&op.operands) {
                    state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some([v]) = numbers::<1>(&op.operands) {
                    state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some([v]) = numbers::<1>(&op.operands) {
                    state.horiz_scale = v / 100.0;
                }
            }
            "Ts" => {
                if let Some([v]) = numbers::<1>(&op.operands) {
                    state.text_rise = v;
                }
            }

            // -- Show text ----------------------------------------------
            "Tj" => {
                if let Some(first) = op.operands.first() {
                    emit_show_string(first, backend, page_id, &mut state, &mut runs);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(arr)) = op.operands.first() {
                    handle_tj_array(arr, backend, page_id, &mut state, &mut runs);
                }
            }
            "'" => {
                state.next_line();
                if let Some(first) = op.operands.first() {
                    emit_show_string(first, backend, page_id, &mut state, &mut runs);
                }
            }
            "\"" => {
                // aw ac string  =>  Tw, Tc, T*, Tj
                if op.operands.len() >= 3 {
                    if let Some(aw) = get_number_from_value(&op.operands[0]) {
                        state.word_spacing = aw;
                    }
                    if let Some(ac) = get_number_from_value(&op.operands[1]) {
                        state.char_spacing = ac;
                    }
                    state.next_line();
                    emit_show_string(&op.operands[2], backend, page_id, &mut state, &mut runs);
                }
            }

            _ => {}
        }
    }

    Ok(runs)
}

fn handle_tf(operands: &[PdfValue], fonts: &[BackendFontInfo], state: &mut TextState) {
    if operands.len() < 2 {
        return;
    }
    let key = match &operands[0] {
        PdfValue::Name(n) => n.clone(),
        PdfValue::Str(s) => s.clone(),
        _ => return,
    };
    let size = get_number_from_value(&operands[1]).unwrap_or(0.0);
    let info = resolve_font(&key, fonts);
    state.set_font(key, info, size);
}

/// Build a run from already decoded text and the page-space origin and width.
fn push_run(
    text: &str,
    origin: (f32, f32),
    width: f32,
    state: &TextState,
    runs: &mut Vec<TextRun>,
) {
    let text = clean_run_text(text);
    if text.trim().is_empty() {
        return;
    }
    runs.push(TextRun {
        text,
        x: origin.0,
        y: origin.1,
        width,
        font_size: state.effective_font_size(),
        font_name: state.font_name.clone(),
    });
}

/// Shared by `Tj`, `'` and `"`.
fn emit_show_string(
    operand: &PdfValue,
    backend: &dyn PdfBackend,
    page_id: PageId,
    state: &mut TextState,
    runs: &mut Vec<TextRun>,
) {
    let text = decode_string(operand, backend, page_id, &state.font_key);
    if text.is_empty() {
        return;
    }
    let origin = state.origin();
    let width = state.show(&text);
    push_run(&text, origin, width, state, runs);
}

/// Process a `TJ` array: strings to render interleaved with kerning
/// adjustments in thousandths of a text-space unit. A large negative
/// adjustment reads as a word gap and becomes a space.
fn handle_tj_array(
    arr: &[PdfValue],
    backend: &dyn PdfBackend,
    page_id: PageId,
    state: &mut TextState,
    runs: &mut Vec<TextRun>,
) {
    let mut buf = String::new();
    let mut start: Option<(f32, f32)> = None;
    let mut end_x = 0.0;

    for elem in arr {
        match elem {
            PdfValue::Str(_) => {
                let fragment = decode_string(elem, backend, page_id, &state.font_key);
                if fragment.is_empty() {
                    continue;
                }
                if start.is_none() {
                    start = Some(state.origin());
                }
                state.show(&fragment);
                buf.push_str(&fragment);
                end_x = state.origin().0;
            }
            val => {
                if let Some(adj) = get_number_from_value(val) {
                    let dx = -adj / 1000.0 * state.font_size * state.horiz_scale;
                    let gap_threshold =
                        state.font_size * APPROX_CHAR_WIDTH_RATIO * state.horiz_scale * 0.3;
                    if dx > gap_threshold && !buf.is_empty() && !buf.ends_with(' ') {
                        buf.push(' ');
                    }
                    state.advance_x(dx);
                }
            }
        }
    }

    if let Some(origin) = start {
        let text = buf.trim_end();
        push_run(text, origin, end_x - origin.0, state, runs);
    }
}

// ---------------------------------------------------------------------------
// Public API: line and block grouping
// ---------------------------------------------------------------------------

/// Group runs into lines, top of the page first.
///
/// Runs whose baselines are within [`Y_TOLERANCE`] of the line's first run
/// share a line. Within a line, adjacent runs in the same font merge into a
/// single run; a space is inserted when the gap between them is word-sized.
pub fn group_runs_into_lines(mut runs: Vec<TextRun>) -> Vec<RunLine> {
    // Y descending (top of page first), then X ascending.
    runs.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<RunLine> = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();
    let mut current_y = 0.0;

    for run in runs {
        if !current.is_empty() && (run.y - current_y).abs() > Y_TOLERANCE {
            lines.push(assemble_line(std::mem::take(&mut current)));
        }
        if current.is_empty() {
            current_y = run.y;
        }
        current.push(run);
    }

    if !current.is_empty() {
        lines.push(assemble_line(current));
    }

    lines
}

fn same_font(a: &TextRun, b: &TextRun) -> bool {
    a.font_name == b.font_name && (a.font_size - b.font_size).abs() < FONT_SIZE_EPSILON
}

/// Build a [`RunLine`] from runs known to share one baseline.
fn assemble_line(mut runs: Vec<TextRun>) -> RunLine {
    runs.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());

    for run in runs {
        if let Some(prev) = merged.last_mut() {
            let gap = run.x - prev.right();
            if same_font(prev, &run)
                && gap > -prev.font_size
                && gap < prev.font_size * MAX_MERGE_GAP_FACTOR
            {
                if gap >= MIN_WORD_GAP && !prev.text.ends_with(' ') && !run.text.starts_with(' ')
                {
                    prev.text.push(' ');
                }
                prev.text.push_str(&run.text);
                prev.width = run.right().max(prev.right()) - prev.x;
                continue;
            }
        }
        merged.push(run);
    }

    let y = merged.first().map(|r| r.y).unwrap_or(0.0);
    let font_size = merged.iter().map(|r| r.font_size).fold(0.0, f32::max);

    RunLine {
        runs: merged,
        y,
        font_size,
    }
}

/// Group consecutive lines into blocks.
///
/// A new block starts when:
/// - the vertical gap to the previous line exceeds [`BLOCK_GAP_FACTOR`]
///   times that line's font size, or
/// - the line does not overlap the previous line horizontally (a jump to a
///   different column).
pub fn group_lines_into_blocks(lines: Vec<RunLine>) -> Vec<Vec<RunLine>> {
    let mut blocks: Vec<Vec<RunLine>> = Vec::new();
    let mut current: Vec<RunLine> = Vec::new();

    for line in lines {
        let breaks = current.last().is_some_and(|prev| {
            let gap_break = (prev.y - line.y).abs() > prev.font_size * BLOCK_GAP_FACTOR;
            let (prev_left, prev_right) = prev.extent();
            let (left, right) = line.extent();
            let column_jump = right < prev_left || left > prev_right;
            gap_break || column_jump
        });

        if breaks {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

// ---------------------------------------------------------------------------
// Public API: full pipeline
// ---------------------------------------------------------------------------

/// Span box for a run: baseline-relative ascent and descent, shifted so
/// `origin` becomes `(0, 0)`.
fn run_bbox(run: &TextRun, origin: (f32, f32)) -> BBox {
    let x0 = run.x - origin.0;
    let baseline = run.y - origin.1;
    BBox::new(
        x0,
        baseline - DESCENT_RATIO * run.font_size,
        x0 + run.width,
        baseline + ASCENT_RATIO * run.font_size,
    )
}

/// Turn grouped runs into a [`StructuredPage`], numbering blocks `0..n` in
/// page order.
pub fn build_structured_page(blocks: Vec<Vec<RunLine>>, media_box: [f32; 4]) -> StructuredPage {
    let [llx, lly, urx, ury] = media_box;
    let origin = (llx, lly);

    let blocks = blocks
        .into_iter()
        .enumerate()
        .map(|(number, lines)| {
            let number = number as u32;
            TextBlock {
                number,
                lines: lines
                    .into_iter()
                    .map(|line| TextLine {
                        spans: line
                            .runs
                            .into_iter()
                            .map(|run| Span {
                                bbox: run_bbox(&run, origin),
                                text: run.text,
                                font_name: run.font_name,
                                block_number: number,
                            })
                            .collect(),
                    })
                    .collect(),
            }
        })
        .collect();

    StructuredPage {
        width: urx - llx,
        height: ury - lly,
        blocks,
    }
}

/// Extract the structured text of one page.
pub fn extract_structured_page(
    backend: &dyn PdfBackend,
    page_id: PageId,
) -> Result<StructuredPage, PdfError> {
    let media_box = backend.media_box(page_id)?;
    let runs = extract_page_runs(backend, page_id)?;
    let lines = group_runs_into_lines(runs);
    let blocks = group_lines_into_blocks(lines);
    Ok(build_structured_page(blocks, media_box))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
