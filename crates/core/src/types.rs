use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page space.
///
/// Coordinates follow PDF user space relative to the page's MediaBox origin:
/// `x` grows to the right and `y` grows upward, so `y0` is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        BBox { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Return a copy shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        BBox {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const RED: Rgb = Rgb {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Rgb = Rgb {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };

    pub fn as_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Which input document a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "doc1"),
            Side::Second => write!(f, "doc2"),
        }
    }
}

/// A contiguous run of text sharing one font within a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bbox: BBox,
    pub font_name: String,
    pub block_number: u32,
}

/// A line of text made of one or more [`Span`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLine {
    pub spans: Vec<Span>,
}

/// A numbered group of lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub number: u32,
    pub lines: Vec<TextLine>,
}

/// The block -> line -> span tree for one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredPage {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<TextBlock>,
}

impl StructuredPage {
    /// Iterate every span in block, then line order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.spans().all(|s| s.text.trim().is_empty())
    }
}

/// A single whitespace-delimited word with an estimated bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct WordRecord {
    pub text: String,
    pub bbox: BBox,
    pub block_number: u32,
    pub is_italic: bool,
}

/// Why a word was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    /// Word from the first document with no counterpart in the second.
    OnlyInFirst,
    /// Word from the second document with no counterpart in the first.
    OnlyInSecond,
    /// Italic word present in the caller's words-of-interest list.
    ItalicOfInterest,
}

impl HighlightKind {
    pub fn color(&self) -> Rgb {
        match self {
            HighlightKind::OnlyInFirst => Rgb::RED,
            HighlightKind::OnlyInSecond => Rgb::GREEN,
            HighlightKind::ItalicOfInterest => Rgb::BLUE,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            HighlightKind::OnlyInFirst | HighlightKind::OnlyInSecond => 0.3,
            HighlightKind::ItalicOfInterest => 0.2,
        }
    }
}

/// A semi-transparent rectangle to paint on the output page.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpec {
    /// Rectangle in output-page coordinates.
    pub rect: BBox,
    pub stroke: Rgb,
    pub opacity: f32,
    pub kind: HighlightKind,
}

impl HighlightSpec {
    pub fn new(kind: HighlightKind, rect: BBox) -> Self {
        HighlightSpec {
            rect,
            stroke: kind.color(),
            opacity: kind.opacity(),
            kind,
        }
    }
}
