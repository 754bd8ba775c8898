//! Input converters that turn source files into plain text.
//!
//! Synthesis only ever consumes plain text. This module is the seam where
//! other formats are turned into that text: plain text and JSON are built in,
//! and anything else (word-processor documents, for example) can be plugged
//! in by registering another [`TextConverter`].
//!
//! # Example
//!
//! ```no_run
//! use plainpdf::convert::ConverterRegistry;
//! use std::path::Path;
//!
//! fn main() -> plainpdf::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let text = registry.convert(Path::new("notes.md"))?;
//!     let pdf = plainpdf::synthesize(&text)?;
//!     std::fs::write("notes.pdf", pdf)?;
//!     Ok(())
//! }
//! ```

mod json;
mod text;

pub use json::JsonConverter;
pub use text::PlainTextConverter;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for input converters.
///
/// Implement this trait to add support for a new input format.
pub trait TextConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["txt"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert raw file contents to text.
    fn to_text(&self, bytes: &[u8]) -> Result<String>;

    /// Read and convert a file.
    fn convert(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        self.to_text(&bytes)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Decode bytes as UTF-8, reporting where decoding failed.
pub(crate) fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        Error::Encoding(format!(
            "input is not valid UTF-8 (first bad byte at offset {})",
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Registry for input converters.
///
/// The registry maps file extensions to converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn TextConverter>>,
    by_name: HashMap<String, Arc<dyn TextConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in converters (plain text, JSON).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextConverter::new()));
        registry.register(Arc::new(JsonConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions,
    /// replacing any earlier converter for the same extension.
    pub fn register(&mut self, converter: Arc<dyn TextConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn TextConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Convert a file using the converter for its extension.
    pub fn convert(&self, path: &Path) -> Result<String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::UnsupportedInput(format!("{} has no extension", path.display()))
            })?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedInput(format!("no converter for .{}", ext)))?;

        log::debug!("converting {} with '{}'", path.display(), converter.name());
        converter.convert(path)
    }

    /// Convert bytes using the specified extension to pick the converter.
    pub fn convert_bytes(&self, bytes: &[u8], ext: &str) -> Result<String> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedInput(format!("no converter for .{}", ext)))?;

        converter.to_text(bytes)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
