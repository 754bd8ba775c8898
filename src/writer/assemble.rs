//! Object graph assembly.
//!
//! Identifier layout: catalog 1, page tree 2, font 3, then a content stream
//! and page dictionary per page in page order, then the optional info
//! dictionary.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use super::{ContentBuilder, SynthesizeOptions};
use crate::error::{Error, Result};
use crate::model::{BuiltinFont, Document, ObjectId, Page, PdfObject, StreamFilter};

/// Hands out object identifiers 1, 2, 3, ... for one document.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next identifier.
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }

    /// Number of identifiers handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the complete object graph for already-paginated lines.
///
/// Fails without returning a partial document if any page's content cannot
/// be encoded.
pub fn assemble(pages: Vec<Vec<String>>, options: &SynthesizeOptions) -> Result<Document> {
    let mut ids = IdAllocator::new();
    let catalog_id = ids.allocate();
    let tree_id = ids.allocate();
    let font_id = ids.allocate();

    let builder = ContentBuilder::new(&options.layout, options.write.encoding);
    let mut streams = Vec::with_capacity(pages.len());
    let mut layout_pages = Vec::with_capacity(pages.len());

    for (index, lines) in pages.into_iter().enumerate() {
        let number = index as u32 + 1;
        let content_id = ids.allocate();
        let page_id = ids.allocate();

        let raw = builder.build(number, &lines)?;
        let stream = if options.write.compress {
            PdfObject::ContentStream {
                data: deflate(&raw)?,
                filter: Some(StreamFilter::FlateDecode),
            }
        } else {
            PdfObject::ContentStream {
                data: raw,
                filter: None,
            }
        };

        streams.push(stream);
        layout_pages.push(Page::new(number, page_id, content_id, lines));
    }

    let info_id = if options.write.metadata.is_empty() {
        None
    } else {
        Some(ids.allocate())
    };

    let mut doc = Document::new(catalog_id);
    doc.insert(catalog_id, PdfObject::Catalog { pages: tree_id })?;
    doc.insert(
        tree_id,
        PdfObject::PageTree {
            kids: layout_pages.iter().map(|p| p.page_id).collect(),
        },
    )?;
    doc.insert(
        font_id,
        PdfObject::Font {
            base_font: BuiltinFont::Courier,
            encoding: options.write.encoding.font_encoding(),
        },
    )?;

    for (page, stream) in layout_pages.iter().zip(streams) {
        doc.insert(page.content_id, stream)?;
        doc.insert(
            page.page_id,
            PdfObject::Page {
                parent: tree_id,
                media_box: page.media_box,
                contents: page.content_id,
                font: font_id,
            },
        )?;
    }

    if let Some(id) = info_id {
        doc.insert(id, PdfObject::Info(options.write.metadata.clone()))?;
        doc.info = Some(id);
    }
    doc.pages = layout_pages;

    log::debug!(
        "assembled {} pages into {} objects",
        doc.page_count(),
        ids.allocated()
    );
    Ok(doc)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::Compression(e.to_string()))
}
