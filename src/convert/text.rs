//! Plain text input.

use super::{decode_utf8, TextConverter};
use crate::error::Result;

/// Passes UTF-8 text through, dropping a leading byte order mark.
#[derive(Debug, Clone, Default)]
pub struct PlainTextConverter {
    _private: (),
}

impl PlainTextConverter {
    /// Create a new plain text converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextConverter for PlainTextConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text", "log", "md", "markdown"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn to_text(&self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        decode_utf8(bytes)
    }
}
