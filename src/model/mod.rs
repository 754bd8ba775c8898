//! Document model types for the PDF object graph.
//!
//! This module defines the typed representation that sits between layout
//! (wrapped, paginated lines) and serialization (bytes plus xref).

mod document;
mod object;
mod page;

pub use document::{Document, Metadata};
pub use object::{
    BuiltinFont, FontEncoding, MediaBox, ObjectId, PdfObject, StreamFilter, FONT_ALIAS,
};
pub use page::Page;
