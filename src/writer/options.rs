//! Write options and configuration.

use super::TextEncoding;
use crate::error::Result;
use crate::layout::LayoutOptions;
use crate::model::Metadata;

/// Options for serializing the object graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOptions {
    /// Byte encoding for shown text
    pub encoding: TextEncoding,

    /// Compress content streams with FlateDecode
    pub compress: bool,

    /// Information dictionary contents (omitted when empty)
    pub metadata: Metadata,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Everything a synthesis call needs: layout plus serialization settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesizeOptions {
    /// Wrapping, pagination and placement
    pub layout: LayoutOptions,

    /// Encoding, compression and metadata
    pub write: WriteOptions,
}

impl SynthesizeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set write options.
    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }

    /// Reject settings that cannot produce a document.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}
