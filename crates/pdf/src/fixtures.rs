//! In-memory PDF builders shared by the tests of this crate.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One `Tj` drawn with `/F1` (Helvetica) or `/F2` (Times-Italic).
#[derive(Debug, Clone)]
pub struct FixtureText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub italic: bool,
}

impl FixtureText {
    pub fn new(text: &str, x: f32, y: f32) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            size: 12.0,
            italic: false,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FixturePage {
    pub texts: Vec<FixtureText>,
    pub media_box: [f32; 4],
}

impl FixturePage {
    pub fn new(texts: Vec<FixtureText>) -> Self {
        Self {
            texts,
            media_box: [0.0, 0.0, 612.0, 792.0],
        }
    }

    pub fn with_media_box(mut self, media_box: [f32; 4]) -> Self {
        self.media_box = media_box;
        self
    }
}

fn page_content(page: &FixturePage) -> Vec<u8> {
    let mut operations = Vec::new();
    for text in &page.texts {
        let font = if text.italic { "F2" } else { "F1" };
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![font.into(), text.size.into()]));
        operations.push(Operation::new("Td", vec![text.x.into(), text.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(text.text.as_str())],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }.encode().unwrap()
}

/// Build a document with one page per [`FixturePage`].
pub fn build_pdf(pages: &[FixturePage]) -> Vec<u8> {
    build(pages, None)
}

/// Like [`build_pdf`], with a `/FirstChar` + `/Widths` table on `/F1`.
pub fn build_pdf_with_widths(pages: &[FixturePage], first_char: i64, widths: &[f32]) -> Vec<u8> {
    build(pages, Some((first_char, widths)))
}

fn build(pages: &[FixturePage], widths: Option<(i64, &[f32])>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut regular = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    };
    if let Some((first_char, widths)) = widths {
        regular.set("FirstChar", first_char);
        regular.set(
            "Widths",
            widths.iter().map(|w| Object::Real(*w)).collect::<Vec<_>>(),
        );
    }
    let regular_id = doc.add_object(regular);
    let italic_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Italic",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => italic_id,
        },
    });

    let mut kids = Vec::new();
    for page in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(page)));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => page.media_box.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Replace the MediaBox of page `page_number` (1-based) with one holding a
/// name where a number belongs, so the page's geometry cannot be read.
pub fn break_media_box(bytes: &[u8], page_number: u32) -> Vec<u8> {
    let mut doc = Document::load_mem(bytes).unwrap();
    let page_id = doc.get_pages()[&page_number];
    let page = doc.get_object_mut(page_id).unwrap().as_dict_mut().unwrap();
    page.set(
        "MediaBox",
        vec![0.into(), 0.into(), Object::Name(b"X".to_vec()), 792.into()],
    );

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// Write a fixture document to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: &[FixturePage]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

/// One page per entry, each holding a single line of Helvetica text at
/// (72, 720).
pub fn single_line_pages(lines: &[&str]) -> Vec<FixturePage> {
    lines
        .iter()
        .map(|line| FixturePage::new(vec![FixtureText::new(line, 72.0, 720.0)]))
        .collect()
}
