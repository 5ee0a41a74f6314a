//! Output document composition.
//!
//! The [`Compositor`] builds the side-by-side result page by page: every
//! source page becomes a Form XObject drawn into its slot, and every
//! [`HighlightSpec`] becomes a `/Highlight` annotation carrying its own
//! appearance stream.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use pdfdiff_core::page::PageSize;
use pdfdiff_core::{HighlightSpec, Side};

use crate::parser::backend::{LopdfBackend, PageId, PdfBackend};
use crate::PdfError;

const PDF_VERSION: &str = "1.7";

/// A source page imported into the output document as a Form XObject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportedPage {
    pub side: Side,
    pub xobject: ObjectId,
    /// The source page's MediaBox, also the XObject's `/BBox`.
    pub media_box: [f32; 4],
}

impl ImportedPage {
    pub fn size(&self) -> PageSize {
        let [llx, lly, urx, ury] = self.media_box;
        PageSize::new(urx - llx, ury - lly)
    }

    fn resource_name(&self) -> &'static str {
        match self.side {
            Side::First => "Xa",
            Side::Second => "Xb",
        }
    }
}

/// Where an imported page is drawn on an output page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: ImportedPage,
    /// Translation of the slot's origin in output page space.
    pub offset: (f32, f32),
}

/// Incrementally builds the output document.
pub struct Compositor {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    /// Source object id -> output object id, one map per input document, so
    /// shared resources are copied once per side.
    copied: [BTreeMap<ObjectId, ObjectId>; 2],
    info: Dictionary,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            copied: [BTreeMap::new(), BTreeMap::new()],
            info: Dictionary::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Import one page of `source` as a Form XObject.
    ///
    /// The XObject carries the page's decoded content, a deep copy of its
    /// (possibly inherited) resources and its MediaBox as `/BBox`. An
    /// unreadable MediaBox falls back to US Letter and unreadable content to
    /// an empty form, so a damaged page still gets its slot.
    pub fn import_page(
        &mut self,
        side: Side,
        source: &LopdfBackend,
        page: PageId,
    ) -> ImportedPage {
        let media_box = source.media_box_or_default(page);
        let content = source.page_content(page).unwrap_or_default();

        let resources = match source.page_resources(page) {
            Some(dict) => self.copy_dict(side, source.raw_doc(), dict),
            None => Dictionary::new(),
        };

        let [llx, lly, urx, ury] = media_box;
        let form = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "FormType" => 1,
                "BBox" => vec![llx.into(), lly.into(), urx.into(), ury.into()],
                "Matrix" => vec![1.into(), 0.into(), 0.into(), 1.into(), 0.into(), 0.into()],
                "Resources" => resources,
            },
            content,
        );

        ImportedPage {
            side,
            xobject: self.doc.add_object(form),
            media_box,
        }
    }

    /// Append an output page of `size` drawing `placements` and carrying one
    /// annotation per highlight, in order.
    pub fn add_page(
        &mut self,
        size: PageSize,
        placements: &[Placement],
        highlights: &[HighlightSpec],
    ) -> Result<ObjectId, PdfError> {
        let page_id = self.doc.new_object_id();

        let mut operations = Vec::new();
        let mut xobjects = Dictionary::new();
        for placement in placements {
            let [llx, lly, _, _] = placement.page.media_box;
            let (dx, dy) = placement.offset;
            let name = placement.page.resource_name();
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new(
                "cm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    (dx - llx).into(),
                    (dy - lly).into(),
                ],
            ));
            operations.push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
            operations.push(Operation::new("Q", vec![]));
            xobjects.set(name, placement.page.xobject);
        }
        let content = encode(operations)?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));

        let annots: Vec<Object> = highlights
            .iter()
            .map(|spec| self.add_highlight(page_id, spec).map(Object::Reference))
            .collect::<Result<_, _>>()?;

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => xobjects,
            },
        };
        if !annots.is_empty() {
            page.set("Annots", annots);
        }

        self.doc.objects.insert(page_id, Object::Dictionary(page));
        self.kids.push(page_id);
        Ok(page_id)
    }

    /// Record producer and source names in the document information dictionary.
    pub fn set_info(&mut self, producer: &str, source_a: &str, source_b: &str) {
        self.info.set("Producer", Object::string_literal(producer));
        self.info.set(
            "Title",
            Object::string_literal(format!("Comparison of {source_a} and {source_b}")),
        );
        self.info.set("SourceA", Object::string_literal(source_a));
        self.info.set("SourceB", Object::string_literal(source_b));
    }

    /// Finish the document and write it to `path`.
    ///
    /// The document is serialised into a temporary file next to `path` and
    /// renamed over it only once fully written; on any failure the temporary
    /// file is removed and `path` is left untouched.
    pub fn save_atomic(mut self, path: &Path) -> Result<(), PdfError> {
        self.finish();

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".pdfdiff-")
            .suffix(".pdf.tmp")
            .tempfile_in(dir)?;

        self.doc
            .save_to(&mut tmp)
            .map_err(|e| PdfError::Write(e.to_string()))?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| PdfError::Io(e.error))?;
        Ok(())
    }

    /// Install the page tree, catalog and info dictionary.
    fn finish(&mut self) {
        let kids: Vec<Object> = self.kids.iter().map(|id| Object::Reference(*id)).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let info_id = self.doc.add_object(std::mem::take(&mut self.info));
            self.doc.trailer.set("Info", info_id);
        }

        self.doc.compress();
    }

    fn add_highlight(
        &mut self,
        page_id: ObjectId,
        spec: &HighlightSpec,
    ) -> Result<ObjectId, PdfError> {
        let [x0, y0, x1, y1] = spec.rect.as_array();
        let [r, g, b] = spec.stroke.as_array();
        let rect = || -> Vec<Object> { vec![x0.into(), y0.into(), x1.into(), y1.into()] };

        let appearance = encode(vec![
            Operation::new("q", vec![]),
            Operation::new("gs", vec![Object::Name(b"GS0".to_vec())]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new(
                "re",
                vec![x0.into(), y0.into(), (x1 - x0).into(), (y1 - y0).into()],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ])?;
        let appearance_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "FormType" => 1,
                "BBox" => rect(),
                "Resources" => dictionary! {
                    "ExtGState" => dictionary! {
                        "GS0" => dictionary! {
                            "Type" => "ExtGState",
                            "CA" => spec.opacity,
                            "ca" => spec.opacity,
                            "BM" => "Multiply",
                        },
                    },
                },
            },
            appearance,
        ));

        Ok(self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Highlight",
            "Rect" => rect(),
            "QuadPoints" => vec![
                x0.into(), y1.into(),
                x1.into(), y1.into(),
                x0.into(), y0.into(),
                x1.into(), y0.into(),
            ],
            "C" => vec![r.into(), g.into(), b.into()],
            "CA" => spec.opacity,
            "F" => 4,
            "P" => page_id,
            "AP" => dictionary! {
                "N" => appearance_id,
            },
        }))
    }

    // -- deep copy ----------------------------------------------------------

    fn copy_object(&mut self, side: Side, source: &Document, obj: &Object) -> Object {
        match obj {
            Object::Reference(id) => Object::Reference(self.copy_reference(side, source, *id)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(side, source, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dict(side, source, dict)),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.copy_dict(side, source, &stream.dict);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_dict(&mut self, side: Side, source: &Document, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy_object(side, source, value));
        }
        copy
    }

    /// Copy the object behind `id` once per side. Page tree nodes are not
    /// followed: they become `null` in the output.
    fn copy_reference(&mut self, side: Side, source: &Document, id: ObjectId) -> ObjectId {
        let slot = side_index(side);
        if let Some(copied) = self.copied[slot].get(&id) {
            return *copied;
        }

        let new_id = self.doc.new_object_id();
        self.copied[slot].insert(id, new_id);

        let copy = match source.get_object(id) {
            Ok(obj) if is_page_tree_node(obj) => Object::Null,
            Ok(obj) => self.copy_object(side, source, obj),
            Err(_) => Object::Null,
        };
        self.doc.objects.insert(new_id, copy);
        new_id
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::First => 0,
        Side::Second => 1,
    }
}

fn is_page_tree_node(obj: &Object) -> bool {
    let dict = match obj {
        Object::Dictionary(dict) => dict,
        _ => return false,
    };
    matches!(
        dict.get(b"Type").and_then(|t| t.as_name()),
        Ok(b"Page") | Ok(b"Pages")
    )
}

fn encode(operations: Vec<Operation>) -> Result<Vec<u8>, PdfError> {
    Content { operations }
        .encode()
        .map_err(|e| PdfError::Write(format!("content stream encode error: {}", e)))
}
