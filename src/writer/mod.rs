//! PDF writing: content streams, object graph assembly and serialization.

mod assemble;
mod content;
mod encoding;
mod options;
pub mod xref;

pub use assemble::{assemble, IdAllocator};
pub use content::{escape_pdf_string, unescape_pdf_string, ContentBuilder};
pub use encoding::TextEncoding;
pub use options::{SynthesizeOptions, WriteOptions};
pub use xref::{serialize, write_header, OffsetTable, BINARY_MARKER, PDF_VERSION};

use crate::error::Result;
use crate::layout::layout_text;
use crate::model::Document;

/// Lay out `text` and assemble its object graph without serializing it.
pub fn build_document(text: &str, options: &SynthesizeOptions) -> Result<Document> {
    options.validate()?;
    let pages = layout_text(text, &options.layout);
    assemble(pages, options)
}

/// Run the whole pipeline and return the finished PDF bytes.
pub fn render(text: &str, options: &SynthesizeOptions) -> Result<Vec<u8>> {
    let doc = build_document(text, options)?;
    serialize(&doc)
}
