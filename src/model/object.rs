//! Typed PDF objects.
//!
//! The writer only ever emits a small closed set of objects, so each one is a
//! variant with its own fixed field set instead of a generic dictionary.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Metadata;
use crate::writer::escape_pdf_string;

/// Identifier of an indirect object (always generation 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Numeric value of the identifier.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    /// Formats as an indirect reference, e.g. `3 0 R`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// Page geometry in user-space units (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaBox {
    pub width: u32,
    pub height: u32,
}

impl MediaBox {
    /// US Letter, portrait (8.5 x 11 inches).
    pub const LETTER: MediaBox = MediaBox {
        width: 612,
        height: 792,
    };
}

impl Default for MediaBox {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Built-in Type1 faces usable without embedding glyph data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuiltinFont {
    #[default]
    Courier,
}

impl BuiltinFont {
    /// The `/BaseFont` name.
    pub fn base_name(self) -> &'static str {
        match self {
            BuiltinFont::Courier => "Courier",
        }
    }
}

/// Character encoding declared on the font dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontEncoding {
    WinAnsi,
}

/// Filter applied to a stream payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamFilter {
    FlateDecode,
}

/// One indirect object body.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Document entry point.
    Catalog { pages: ObjectId },

    /// Page tree root. `kids` order is rendering order.
    PageTree { kids: Vec<ObjectId> },

    /// A single page.
    Page {
        parent: ObjectId,
        media_box: MediaBox,
        contents: ObjectId,
        font: ObjectId,
    },

    /// Shared font resource.
    Font {
        base_font: BuiltinFont,
        encoding: Option<FontEncoding>,
    },

    /// Page content stream. `data` is the final (possibly filtered) payload.
    ContentStream {
        data: Vec<u8>,
        filter: Option<StreamFilter>,
    },

    /// Document information dictionary.
    Info(Metadata),
}

/// Resource name the page dictionaries use for the shared font.
pub const FONT_ALIAS: &str = "F1";

impl PdfObject {
    /// Short kind name, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PdfObject::Catalog { .. } => "Catalog",
            PdfObject::PageTree { .. } => "Pages",
            PdfObject::Page { .. } => "Page",
            PdfObject::Font { .. } => "Font",
            PdfObject::ContentStream { .. } => "ContentStream",
            PdfObject::Info(_) => "Info",
        }
    }

    /// Every identifier this body refers to.
    pub fn references(&self) -> Vec<ObjectId> {
        match self {
            PdfObject::Catalog { pages } => vec![*pages],
            PdfObject::PageTree { kids } => kids.clone(),
            PdfObject::Page {
                parent,
                contents,
                font,
                ..
            } => vec![*parent, *contents, *font],
            PdfObject::Font { .. } | PdfObject::ContentStream { .. } | PdfObject::Info(_) => {
                Vec::new()
            }
        }
    }

    /// Serialize the body (the part between `N 0 obj\n` and `\nendobj`).
    pub fn write_body(&self, out: &mut Vec<u8>) {
        match self {
            PdfObject::Catalog { pages } => {
                out.extend_from_slice(format!("<< /Type /Catalog /Pages {} >>", pages).as_bytes());
            }
            PdfObject::PageTree { kids } => {
                let refs: Vec<String> = kids.iter().map(|k| k.to_string()).collect();
                out.extend_from_slice(
                    format!(
                        "<< /Type /Pages /Kids [{}] /Count {} >>",
                        refs.join(" "),
                        kids.len()
                    )
                    .as_bytes(),
                );
            }
            PdfObject::Page {
                parent,
                media_box,
                contents,
                font,
            } => {
                out.extend_from_slice(
                    format!(
                        "<< /Type /Page /Parent {} /MediaBox [0 0 {} {}] /Contents {} \
                         /Resources << /Font << /{} {} >> >> >>",
                        parent, media_box.width, media_box.height, contents, FONT_ALIAS, font
                    )
                    .as_bytes(),
                );
            }
            PdfObject::Font {
                base_font,
                encoding,
            } => {
                let mut dict = format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{}",
                    base_font.base_name()
                );
                if let Some(FontEncoding::WinAnsi) = encoding {
                    dict.push_str(" /Encoding /WinAnsiEncoding");
                }
                dict.push_str(" >>");
                out.extend_from_slice(dict.as_bytes());
            }
            PdfObject::ContentStream { data, filter } => {
                let header = match filter {
                    Some(StreamFilter::FlateDecode) => {
                        format!("<< /Length {} /Filter /FlateDecode >>", data.len())
                    }
                    None => format!("<< /Length {} >>", data.len()),
                };
                out.extend_from_slice(header.as_bytes());
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
            PdfObject::Info(metadata) => write_info(metadata, out),
        }
    }
}

fn write_info(metadata: &Metadata, out: &mut Vec<u8>) {
    out.extend_from_slice(b"<<");
    let text_fields = [
        ("Title", &metadata.title),
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Keywords", &metadata.keywords),
        ("Creator", &metadata.creator),
        ("Producer", &metadata.producer),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            out.extend_from_slice(format!(" /{} ", key).as_bytes());
            out.extend_from_slice(text_string(value).as_bytes());
        }
    }
    let date_fields = [
        ("CreationDate", &metadata.created),
        ("ModDate", &metadata.modified),
    ];
    for (key, value) in date_fields {
        if let Some(date) = value {
            out.extend_from_slice(
                format!(" /{} ({})", key, date.format("D:%Y%m%d%H%M%SZ")).as_bytes(),
            );
        }
    }
    out.extend_from_slice(b" >>");
}

/// Encode a PDF text string: a literal string for ASCII, UTF-16BE hex with a
/// byte order mark otherwise.
fn text_string(value: &str) -> String {
    if value.is_ascii() {
        format!("({})", escape_pdf_string(value))
    } else {
        let mut hex = String::from("<FEFF");
        for unit in value.encode_utf16() {
            hex.push_str(&format!("{:04X}", unit));
        }
        hex.push('>');
        hex
    }
}
