//! Text layout: wrapping raw text into display lines and grouping them
//! into pages.

mod options;
mod paginate;
mod wrap;

pub use options::{LayoutOptions, DEFAULT_COLUMN_WIDTH, DEFAULT_LINES_PER_PAGE};
pub use paginate::paginate;
pub use wrap::{normalize, wrap_text};

/// Wrap and paginate `text` according to `options`.
///
/// Always returns at least one page. Callers are expected to have run
/// [`LayoutOptions::validate`].
pub fn layout_text(text: &str, options: &LayoutOptions) -> Vec<Vec<String>> {
    let text = normalize(text, options.normalize_unicode);
    let lines = wrap_text(&text, options.column_width);
    log::debug!(
        "wrapped {} bytes into {} lines at width {}",
        text.len(),
        lines.len(),
        options.column_width
    );
    paginate(lines, options.lines_per_page)
}
