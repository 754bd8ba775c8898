//! # plainpdf
//!
//! Minimal plain-text to PDF synthesizer for Rust.
//!
//! This library takes arbitrary text and produces a valid, paginated PDF
//! from scratch: it builds the object graph, the content streams and a
//! byte-accurate cross-reference table itself, with no PDF library
//! underneath.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> plainpdf::Result<()> {
//!     let pdf = plainpdf::synthesize("Hello, world!\n\nSecond paragraph.")?;
//!     std::fs::write("hello.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fixed-width layout**: 110-column wrapping, 55 lines per page, Courier
//! - **Byte-accurate xref**: offsets are counted in encoded bytes, so
//!   non-ASCII text never skews the table
//! - **Deterministic**: identical input gives identical bytes
//! - **Optional extras**: Flate-compressed streams, WinAnsi encoding,
//!   document information dictionary
//! - **Verification**: [`inspect`] reads back and checks emitted files

pub mod convert;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod model;
pub mod writer;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use convert::{ConverterRegistry, JsonConverter, PlainTextConverter, TextConverter};
pub use error::{Error, Result};
pub use inspect::{extract_lines, inspect, is_pdf_bytes, InspectReport};
pub use layout::{LayoutOptions, DEFAULT_COLUMN_WIDTH, DEFAULT_LINES_PER_PAGE};
pub use model::{Document, Metadata, ObjectId, Page, PdfObject};
pub use writer::{SynthesizeOptions, TextEncoding, WriteOptions};

use std::fs;
use std::io::Write;
use std::path::Path;

/// Synthesize a PDF from text using default options.
///
/// # Example
///
/// ```
/// let pdf = plainpdf::synthesize("Hello").unwrap();
/// assert!(pdf.starts_with(b"%PDF-1.4"));
/// ```
pub fn synthesize(text: &str) -> Result<Vec<u8>> {
    synthesize_with_options(text, &SynthesizeOptions::default())
}

/// Synthesize a PDF from text with custom options.
///
/// # Example
///
/// ```
/// use plainpdf::{synthesize_with_options, LayoutOptions, SynthesizeOptions};
///
/// let options = SynthesizeOptions::new()
///     .with_layout(LayoutOptions::new().with_column_width(80));
/// let pdf = synthesize_with_options("Hello", &options).unwrap();
/// assert!(pdf.ends_with(b"%%EOF\n"));
/// ```
pub fn synthesize_with_options(text: &str, options: &SynthesizeOptions) -> Result<Vec<u8>> {
    writer::render(text, options)
}

/// Synthesize a PDF and write it to `writer`.
///
/// The document is fully built before anything is written, so build
/// failures never reach the writer. Failures of the writer itself are
/// reported as [`Error::Write`].
pub fn write_to<W: Write>(mut writer: W, text: &str, options: &SynthesizeOptions) -> Result<()> {
    let bytes = synthesize_with_options(text, options)?;
    writer.write_all(&bytes).map_err(Error::Write)?;
    writer.flush().map_err(Error::Write)
}

/// Synthesize a PDF and write it to a file.
///
/// If the write fails, whatever was written is removed so no truncated
/// document is left behind.
///
/// # Example
///
/// ```no_run
/// use plainpdf::{write_file, SynthesizeOptions};
///
/// write_file("resume.pdf", "Jane Doe\nEngineer", &SynthesizeOptions::default()).unwrap();
/// ```
pub fn write_file<P: AsRef<Path>>(path: P, text: &str, options: &SynthesizeOptions) -> Result<()> {
    let path = path.as_ref();
    let bytes = synthesize_with_options(text, options)?;
    if let Err(e) = fs::write(path, &bytes) {
        discard_partial(path);
        return Err(Error::Write(e));
    }
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Synthesize a PDF and write it to a file asynchronously.
#[cfg(feature = "async")]
pub async fn write_file_async<P: AsRef<Path>>(
    path: P,
    text: &str,
    options: &SynthesizeOptions,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = synthesize_with_options(text, options)?;
    if let Err(e) = tokio::fs::write(path, &bytes).await {
        discard_partial(path);
        return Err(Error::Write(e));
    }
    Ok(())
}

fn discard_partial(path: &Path) {
    if path.exists() {
        match fs::remove_file(path) {
            Ok(()) => log::warn!("removed partially written {}", path.display()),
            Err(e) => log::warn!("could not remove partial {}: {}", path.display(), e),
        }
    }
}

/// Convert an input file to text with the default converters and write
/// the resulting PDF to `output`.
///
/// # Example
///
/// ```no_run
/// use plainpdf::{convert_file, SynthesizeOptions};
///
/// convert_file("result.json", "result.pdf", &SynthesizeOptions::default()).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &SynthesizeOptions,
) -> Result<()> {
    let text = ConverterRegistry::with_defaults().convert(input.as_ref())?;
    write_file(output, &text, options)
}

/// Builder for synthesizing PDF documents.
///
/// # Example
///
/// ```
/// use plainpdf::Synthesizer;
///
/// let pdf = Synthesizer::new()
///     .with_column_width(90)
///     .with_lines_per_page(50)
///     .with_title("Notes")
///     .compressed()
///     .synthesize("Some notes")?;
/// assert!(plainpdf::is_pdf_bytes(&pdf));
/// # Ok::<(), plainpdf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    options: SynthesizeOptions,
}

impl Synthesizer {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column width.
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.options.layout = self.options.layout.with_column_width(width);
        self
    }

    /// Set the page capacity in lines.
    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.options.layout = self.options.layout.with_lines_per_page(lines);
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.options.layout = self.options.layout.with_font_size(size);
        self
    }

    /// Normalize input to Unicode NFC before wrapping.
    pub fn normalized(mut self) -> Self {
        self.options.layout = self.options.layout.with_normalization(true);
        self
    }

    /// Set the text encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.options.write = self.options.write.with_encoding(encoding);
        self
    }

    /// Compress content streams.
    pub fn compressed(mut self) -> Self {
        self.options.write = self.options.write.with_compression(true);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.write.metadata.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.options.write.metadata.author = Some(author.into());
        self
    }

    /// Set all metadata at once.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.options.write = self.options.write.with_metadata(metadata);
        self
    }

    /// Get the accumulated options.
    pub fn options(&self) -> &SynthesizeOptions {
        &self.options
    }

    /// Build the object graph without serializing it.
    pub fn build(&self, text: &str) -> Result<Document> {
        writer::build_document(text, &self.options)
    }

    /// Synthesize the PDF bytes.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        synthesize_with_options(text, &self.options)
    }

    /// Synthesize and write to a file.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, text: &str) -> Result<()> {
        write_file(path, text, &self.options)
    }
}
