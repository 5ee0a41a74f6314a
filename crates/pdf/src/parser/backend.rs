use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{self, content::Content};

use crate::PdfError;

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// A page identifier mirroring `lopdf::ObjectId`: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter, used when a page carries no MediaBox.
pub const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Font information extracted from a page's resource dictionary.
#[derive(Debug, Clone, Default)]
pub struct BackendFontInfo {
    /// The font name key as it appears in the resource dictionary (e.g. `b"F1"`).
    pub name: Vec<u8>,
    /// Base font name from the font dictionary, if present.
    pub base_font: Option<String>,
    /// Glyph advance table of a simple font.
    pub widths: Option<FontWidths>,
}

/// The `/FirstChar` + `/Widths` pair of a simple font, in glyph-space units
/// (1/1000 of the font size).
#[derive(Debug, Clone, PartialEq)]
pub struct FontWidths {
    pub first_char: u32,
    pub widths: Vec<f32>,
    /// `/MissingWidth` from the font descriptor, used for codes outside the table.
    pub missing_width: Option<f32>,
}

impl FontWidths {
    /// Advance of a single character code, if known.
    pub fn get(&self, code: u32) -> Option<f32> {
        code.checked_sub(self.first_char)
            .and_then(|idx| self.widths.get(idx as usize).copied())
            .filter(|w| *w > 0.0)
            .or(self.missing_width.filter(|w| *w > 0.0))
    }
}

/// A simplified, lopdf-independent representation of a PDF value.
///
/// This enum decouples higher-level logic from the concrete `lopdf::Object`
/// type so that the functional core can work with pure data.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Dict(Vec<(Vec<u8>, PdfValue)>),
    Reference(PageId),
}

/// A single content-stream operation (operator + operands).
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Extract an `f32` from a [`PdfValue`], accepting both `Integer` and `Real`.
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(f) => Some(*f),
        _ => None,
    }
}

/// Convert a `lopdf::Object` into a [`PdfValue`].
///
/// References are preserved as `PdfValue::Reference`. Stream dictionaries
/// are converted but the raw stream bytes are discarded.
pub fn convert_object(obj: &lopdf::Object) -> PdfValue {
    match obj {
        lopdf::Object::Null => PdfValue::Null,
        lopdf::Object::Boolean(b) => PdfValue::Bool(*b),
        lopdf::Object::Integer(i) => PdfValue::Integer(*i),
        lopdf::Object::Real(f) => PdfValue::Real(*f),
        lopdf::Object::Name(n) => PdfValue::Name(n.clone()),
        lopdf::Object::String(s, _) => PdfValue::Str(s.clone()),
        lopdf::Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        lopdf::Object::Dictionary(dict) => PdfValue::Dict(convert_dict(dict)),
        lopdf::Object::Stream(stream) => PdfValue::Dict(convert_dict(&stream.dict)),
        lopdf::Object::Reference(id) => PdfValue::Reference(*id),
    }
}

fn convert_dict(dict: &lopdf::Dictionary) -> Vec<(Vec<u8>, PdfValue)> {
    dict.iter()
        .map(|(k, v)| (k.clone(), convert_object(v)))
        .collect()
}

/// Best-effort decoding of raw PDF string bytes into a Rust `String`.
///
/// Handles three cases in order:
/// 1. UTF-16BE with BOM (`\xFE\xFF` prefix) -- strips BOM and decodes.
/// 2. Valid UTF-8 -- returned as-is.
/// 3. Fallback to Latin-1 (ISO 8859-1) -- each byte mapped to its Unicode
///    code point.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let code_units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&code_units);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1 (PDFDocEncoding for the printable range).
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// PdfBackend trait
// ---------------------------------------------------------------------------

/// Abstraction over a PDF parsing backend (currently backed by `lopdf`).
///
/// This trait exists so that the structured text extractor can be tested
/// against mock implementations without building real PDF files.
pub trait PdfBackend {
    /// Return a mapping from 1-based page number to [`PageId`].
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return font information for every font referenced by the given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>, PdfError>;

    /// Return the decompressed content of every content stream of a page,
    /// joined by newlines.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>, PdfError>;

    /// Decode raw content-stream bytes into a sequence of [`ContentOp`]s.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>, PdfError>;

    /// Decode raw string bytes found in a text-showing operator, using any
    /// font-specific encoding information the backend can find for the given
    /// page and font name.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;

    /// The page's MediaBox `[llx, lly, urx, ury]`, inherited from the page
    /// tree when the page does not declare one.
    fn media_box(&self, page: PageId) -> Result<[f32; 4], PdfError>;
}

// ---------------------------------------------------------------------------
// LopdfBackend
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] implementation backed by [`lopdf::Document`].
pub struct LopdfBackend {
    doc: lopdf::Document,
}

impl LopdfBackend {
    /// Parse a PDF from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        Ok(Self { doc })
    }

    /// Read and parse a PDF file.
    pub fn load(path: &Path) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path)?;
        Self::load_bytes(&bytes)
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &lopdf::Document {
        &self.doc
    }

    /// The page's MediaBox, or [`DEFAULT_MEDIA_BOX`] when it cannot be read.
    pub fn media_box_or_default(&self, page: PageId) -> [f32; 4] {
        self.media_box(page).unwrap_or(DEFAULT_MEDIA_BOX)
    }

    /// Page dimensions `(width, height)` computed from the MediaBox.
    pub fn page_dimensions(&self, page: PageId) -> (f32, f32) {
        let [llx, lly, urx, ury] = self.media_box_or_default(page);
        ((urx - llx).abs(), (ury - lly).abs())
    }

    /// The page's `/Resources` dictionary, inherited from the page tree when
    /// the page does not declare one.
    pub fn page_resources(&self, page: PageId) -> Option<&lopdf::Dictionary> {
        let dict = self.doc.get_object(page).ok()?.as_dict().ok()?;
        self.find_inherited(dict, b"Resources", 0)
            .and_then(|obj| self.resolve(obj).as_dict().ok())
    }

    // -- private helpers ----------------------------------------------------

    /// Follow a single level of indirection.
    fn resolve<'a>(&'a self, obj: &'a lopdf::Object) -> &'a lopdf::Object {
        match obj {
            lopdf::Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            other => other,
        }
    }

    /// Walk up the page tree looking for an inheritable attribute. The depth
    /// guard stops on malformed, cyclic `/Parent` chains.
    fn find_inherited<'a>(
        &'a self,
        dict: &'a lopdf::Dictionary,
        key: &[u8],
        depth: usize,
    ) -> Option<&'a lopdf::Object> {
        if depth > 32 {
            return None;
        }
        if let Ok(obj) = dict.get(key) {
            return Some(obj);
        }
        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        let parent = self.doc.get_object(parent_id).ok()?.as_dict().ok()?;
        self.find_inherited(parent, key, depth + 1)
    }

    /// Convert an array of lopdf numbers to `f32` values.
    fn array_to_f32s(&self, objects: &[lopdf::Object]) -> Result<Vec<f32>, PdfError> {
        objects
            .iter()
            .map(|obj| match self.resolve(obj) {
                lopdf::Object::Integer(i) => Ok(*i as f32),
                lopdf::Object::Real(f) => Ok(*f),
                other => Err(PdfError::Parse(format!(
                    "expected number in array, got {:?}",
                    other
                ))),
            })
            .collect()
    }

    /// Read `/FirstChar` and `/Widths` from a simple font dictionary.
    fn font_widths(&self, dict: &lopdf::Dictionary) -> Option<FontWidths> {
        let first_char = match dict.get(b"FirstChar").ok().map(|o| self.resolve(o)) {
            Some(lopdf::Object::Integer(i)) if *i >= 0 => *i as u32,
            _ => return None,
        };
        let widths = self
            .resolve(dict.get(b"Widths").ok()?)
            .as_array()
            .ok()?;
        let widths = self.array_to_f32s(widths).ok()?;
        if widths.is_empty() {
            return None;
        }
        let missing_width = dict
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve(o).as_dict().ok())
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(|o| match self.resolve(o) {
                lopdf::Object::Integer(i) => Some(*i as f32),
                lopdf::Object::Real(f) => Some(*f),
                _ => None,
            });
        Some(FontWidths {
            first_char,
            widths,
            missing_width,
        })
    }

    /// Look up the encoding name for a font on a page.
    fn font_encoding_name(&self, page: PageId, font_name: &[u8]) -> Option<String> {
        let fonts = self.doc.get_page_fonts(page).ok()?;
        let font_dict = fonts.get(font_name)?;
        match font_dict.get(b"Encoding").ok()? {
            lopdf::Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PdfBackend implementation for LopdfBackend
// ---------------------------------------------------------------------------

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>, PdfError> {
        let fonts_map = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| PdfError::Parse(format!("cannot get page fonts: {}", e)))?;

        let mut result = Vec::with_capacity(fonts_map.len());
        for (name, dict) in &fonts_map {
            let base_font = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned());

            result.push(BackendFontInfo {
                name: name.clone(),
                base_font,
                widths: self.font_widths(dict),
            });
        }

        Ok(result)
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>, PdfError> {
        let mut content = Vec::new();
        for stream_id in self.doc.get_page_contents(page) {
            let stream = self
                .doc
                .get_object(stream_id)
                .and_then(|o| o.as_stream())
                .map_err(|e| PdfError::Parse(format!("cannot get page content: {}", e)))?;
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            if !content.is_empty() {
                content.push(b'\n');
            }
            content.extend_from_slice(&data);
        }
        Ok(content)
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>, PdfError> {
        let content = Content::decode(data)
            .map_err(|e| PdfError::Parse(format!("content stream decode error: {}", e)))?;

        let ops = content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect();

        Ok(ops)
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Some(enc_name) = self.font_encoding_name(page, font_name) {
            // Identity-H / Identity-V fonts typically use 2-byte CID codes
            // that map to Unicode.  Try UTF-16BE decoding.
            if enc_name.contains("Identity") && bytes.len() >= 2 && bytes.len() % 2 == 0 {
                let code_units: Vec<u16> = bytes
                    .chunks(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                let decoded = String::from_utf16_lossy(&code_units);
                if !decoded.is_empty() && !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
                    return decoded;
                }
            }
        }

        decode_text_simple(bytes)
    }

    fn media_box(&self, page: PageId) -> Result<[f32; 4], PdfError> {
        let page_dict = self
            .doc
            .get_object(page)
            .and_then(|o| o.as_dict())
            .map_err(|e| PdfError::Parse(format!("cannot get page object: {}", e)))?;

        let Some(media_box) = self
            .find_inherited(page_dict, b"MediaBox", 0)
            .map(|o| self.resolve(o))
            .and_then(|o| o.as_array().ok())
        else {
            return Ok(DEFAULT_MEDIA_BOX);
        };

        let nums = self.array_to_f32s(media_box)?;
        if nums.len() < 4 {
            return Err(PdfError::Parse(format!(
                "MediaBox has {} elements, expected 4",
                nums.len()
            )));
        }

        Ok([
            nums[0].min(nums[2]),
            nums[1].min(nums[3]),
            nums[0].max(nums[2]),
            nums[1].max(nums[3]),
        ])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
