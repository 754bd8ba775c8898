//! Page-level types.

use super::{MediaBox, ObjectId};
use serde::{Deserialize, Serialize};

/// A single logical page of the synthesized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Identifier of the page dictionary
    pub page_id: ObjectId,

    /// Identifier of the page's content stream
    pub content_id: ObjectId,

    /// Page geometry
    pub media_box: MediaBox,

    /// Display lines, top to bottom
    pub lines: Vec<String>,
}

impl Page {
    /// Create a new letter-size page.
    pub fn new(number: u32, page_id: ObjectId, content_id: ObjectId, lines: Vec<String>) -> Self {
        Self {
            number,
            page_id,
            content_id,
            media_box: MediaBox::LETTER,
            lines,
        }
    }
}
