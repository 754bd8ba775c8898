//! Grouping of wrapped lines into pages.

/// Split `lines` into pages of at most `capacity` lines.
///
/// An empty input still yields one page holding a single empty line. The
/// last page holds whatever remains. `capacity` must be non-zero.
pub fn paginate(lines: Vec<String>, capacity: usize) -> Vec<Vec<String>> {
    debug_assert!(capacity > 0);
    if lines.is_empty() {
        return vec![vec![String::new()]];
    }

    let mut pages = Vec::with_capacity(lines.len().div_ceil(capacity));
    let mut current = Vec::with_capacity(capacity.min(lines.len()));
    for line in lines {
        current.push(line);
        if current.len() == capacity {
            pages.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}
