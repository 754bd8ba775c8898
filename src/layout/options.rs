//! Layout options and configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default column width in characters.
pub const DEFAULT_COLUMN_WIDTH: usize = 110;

/// Default number of display lines per page.
pub const DEFAULT_LINES_PER_PAGE: usize = 55;

/// Options controlling how text is wrapped, paginated and placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Maximum characters per display line
    pub column_width: usize,

    /// Maximum display lines per page
    pub lines_per_page: usize,

    /// Font size in points
    pub font_size: u32,

    /// Distance between baselines in points
    pub leading: u32,

    /// Horizontal text origin, from the left edge
    pub origin_x: u32,

    /// Vertical text origin (first baseline), from the bottom edge
    pub origin_y: u32,

    /// Apply Unicode NFC normalization before wrapping
    pub normalize_unicode: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column width.
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Set the page capacity in lines.
    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.lines_per_page = lines;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the text leading.
    pub fn with_leading(mut self, leading: u32) -> Self {
        self.leading = leading;
        self
    }

    /// Set the text origin.
    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Reject settings that cannot produce a document.
    pub fn validate(&self) -> Result<()> {
        if self.column_width == 0 {
            return Err(Error::InvalidOptions(
                "column width must be at least 1".to_string(),
            ));
        }
        if self.lines_per_page == 0 {
            return Err(Error::InvalidOptions(
                "lines per page must be at least 1".to_string(),
            ));
        }
        if self.font_size == 0 {
            return Err(Error::InvalidOptions(
                "font size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            font_size: 8,
            leading: 13,
            origin_x: 40,
            origin_y: 750,
            normalize_unicode: false,
        }
    }
}
