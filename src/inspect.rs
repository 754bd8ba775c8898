//! Structural inspection of PDFs produced by this crate.
//!
//! The reader understands exactly the layout the writer emits: a single
//! classic xref section, a trailer dictionary, and uncompressed or
//! Flate-compressed content streams. It is a verification tool, not a
//! general PDF parser.

use std::io::Read;

use flate2::read::ZlibDecoder;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::writer::unescape_pdf_string;
use crate::writer::xref::XREF_ENTRY_LEN;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.4"

/// Summary of a verified PDF buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectReport {
    /// PDF version from the header (e.g., "1.4")
    pub version: String,
    /// Total buffer size in bytes
    pub byte_len: usize,
    /// Indirect objects listed in the xref table (excluding entry 0)
    pub object_count: u32,
    /// Byte offset of the xref table
    pub xref_offset: usize,
    /// Catalog object number
    pub root: u32,
    /// Information dictionary object number, if any
    pub info: Option<u32>,
    /// Pages declared by the page tree
    pub page_count: u32,
    /// Whether any content stream is Flate-compressed
    pub compressed: bool,
}

/// Check whether `data` starts with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Read the version from a PDF header.
pub fn detect_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !is_pdf_bytes(data) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    matches!(
        version,
        "1.0" | "1.1" | "1.2" | "1.3" | "1.4" | "1.5" | "1.6" | "1.7" | "2.0"
    )
}

struct Patterns {
    size: Regex,
    root: Regex,
    info: Regex,
    pages: Regex,
    count: Regex,
    kids: Regex,
    reference: Regex,
    contents: Regex,
    length: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            size: Regex::new(r"/Size\s+(\d+)").unwrap(),
            root: Regex::new(r"/Root\s+(\d+)\s+0\s+R").unwrap(),
            info: Regex::new(r"/Info\s+(\d+)\s+0\s+R").unwrap(),
            pages: Regex::new(r"/Pages\s+(\d+)\s+0\s+R").unwrap(),
            count: Regex::new(r"/Count\s+(\d+)").unwrap(),
            kids: Regex::new(r"/Kids\s*\[([^\]]*)\]").unwrap(),
            reference: Regex::new(r"(\d+)\s+0\s+R").unwrap(),
            contents: Regex::new(r"/Contents\s+(\d+)\s+0\s+R").unwrap(),
            length: Regex::new(r"/Length\s+(\d+)").unwrap(),
        }
    }
}

fn capture_number<T: std::str::FromStr>(re: &Regex, text: &str) -> Option<T> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// A parsed buffer with its verified offset table.
struct Reader<'a> {
    data: &'a [u8],
    offsets: Vec<usize>,
    trailer: String,
    xref_offset: usize,
    patterns: Patterns,
}

impl<'a> Reader<'a> {
    fn open(data: &'a [u8]) -> Result<Self> {
        let patterns = Patterns::new();

        let startxref = rfind(data, b"startxref")
            .ok_or_else(|| Error::Corrupted("missing startxref".to_string()))?;
        let tail = String::from_utf8_lossy(&data[startxref + b"startxref".len()..]);
        let xref_offset: usize = tail
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| Error::Corrupted("unreadable startxref value".to_string()))?;

        if !data
            .get(xref_offset..)
            .is_some_and(|rest| rest.starts_with(b"xref"))
        {
            return Err(Error::Corrupted(format!(
                "startxref {} does not point at an xref table",
                xref_offset
            )));
        }

        let section = &data[xref_offset..];
        let header_end = find(section, b"\n")
            .and_then(|first| find(&section[first + 1..], b"\n").map(|second| first + 1 + second))
            .ok_or_else(|| Error::Corrupted("truncated xref header".to_string()))?;
        let header = String::from_utf8_lossy(&section[..header_end]);
        let mut fields = header.split_whitespace().skip(1);
        let first: u32 = fields.next().and_then(|s| s.parse().ok()).unwrap_or(u32::MAX);
        let count: usize = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::Corrupted("unreadable xref subsection".to_string()))?;
        if first != 0 || count == 0 {
            return Err(Error::Corrupted(format!(
                "unexpected xref subsection '{}'",
                header.trim()
            )));
        }

        let entries_start = header_end + 1;
        let entries_end = count
            .checked_mul(XREF_ENTRY_LEN)
            .and_then(|len| entries_start.checked_add(len))
            .ok_or_else(|| Error::Corrupted(format!("xref entry count {} is too large", count)))?;
        let entries = section
            .get(entries_start..entries_end)
            .ok_or_else(|| Error::Corrupted("truncated xref table".to_string()))?;

        let mut offsets = Vec::with_capacity(count - 1);
        for (number, entry) in entries.chunks(XREF_ENTRY_LEN).enumerate() {
            let entry = String::from_utf8_lossy(entry);
            let mut parts = entry.split_whitespace();
            let offset: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::Corrupted(format!("bad xref entry {}", number)))?;
            let _generation = parts.next();
            let kind = parts.next();
            match (number, kind) {
                (0, Some("f")) => {}
                (0, _) => {
                    return Err(Error::Corrupted("xref entry 0 is not free".to_string()));
                }
                (_, Some("n")) => offsets.push(offset),
                _ => {
                    return Err(Error::Corrupted(format!(
                        "xref entry {} is not in use",
                        number
                    )))
                }
            }
        }

        for (index, offset) in offsets.iter().enumerate() {
            let marker = format!("{} 0 obj", index + 1);
            let at_line_start = *offset == 0 || data.get(offset - 1) == Some(&b'\n');
            if !at_line_start
                || !data
                    .get(*offset..)
                    .is_some_and(|rest| rest.starts_with(marker.as_bytes()))
            {
                return Err(Error::Corrupted(format!(
                    "xref offset {} for object {} does not point at its marker",
                    offset,
                    index + 1
                )));
            }
        }

        let trailer_bytes = data
            .get(xref_offset + entries_end..startxref)
            .ok_or_else(|| Error::Corrupted("missing trailer".to_string()))?;
        let trailer = String::from_utf8_lossy(trailer_bytes).to_string();
        if !trailer.trim_start().starts_with("trailer") {
            return Err(Error::Corrupted("missing trailer".to_string()));
        }

        Ok(Self {
            data,
            offsets,
            trailer,
            xref_offset,
            patterns,
        })
    }

    /// Raw bytes of object `number`, from its marker up to the next object
    /// (or the xref table). Objects are laid out in identifier order.
    fn object(&self, number: u32) -> Result<&'a [u8]> {
        let index = number
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|i| *i < self.offsets.len())
            .ok_or_else(|| Error::MissingObject(format!("object {}", number)))?;
        let start = self.offsets[index];
        let end = self
            .offsets
            .get(index + 1)
            .copied()
            .unwrap_or(self.xref_offset);
        self.data
            .get(start..end)
            .ok_or_else(|| Error::Corrupted(format!("object {} overlaps its successor", number)))
    }

    /// Content stream numbers of every page, in page-tree order.
    fn page_contents(&self) -> Result<Vec<u32>> {
        self.page_ids()?
            .into_iter()
            .map(|page_id| {
                let page = self.dictionary(page_id)?;
                capture_number(&self.patterns.contents, &page)
                    .ok_or_else(|| Error::MissingObject(format!("page {} /Contents", page_id)))
            })
            .collect()
    }

    /// Dictionary text of object `number` (everything before `stream`).
    fn dictionary(&self, number: u32) -> Result<String> {
        let body = self.object(number)?;
        let dict_end = find(body, b"stream").unwrap_or(body.len());
        Ok(String::from_utf8_lossy(&body[..dict_end]).to_string())
    }

    fn root(&self) -> Result<u32> {
        capture_number(&self.patterns.root, &self.trailer)
            .ok_or_else(|| Error::Corrupted("trailer has no /Root".to_string()))
    }

    fn page_tree(&self) -> Result<String> {
        let catalog = self.dictionary(self.root()?)?;
        let tree: u32 = capture_number(&self.patterns.pages, &catalog)
            .ok_or_else(|| Error::MissingObject("catalog /Pages".to_string()))?;
        self.dictionary(tree)
    }

    fn page_ids(&self) -> Result<Vec<u32>> {
        let tree = self.page_tree()?;
        let kids = self
            .patterns
            .kids
            .captures(&tree)
            .and_then(|c| c.get(1))
            .ok_or_else(|| Error::MissingObject("page tree /Kids".to_string()))?;
        Ok(self
            .patterns
            .reference
            .captures_iter(kids.as_str())
            .filter_map(|c| c.get(1)?.as_str().parse().ok())
            .collect())
    }

    /// Decoded content stream of object `number`.
    fn stream(&self, number: u32) -> Result<Vec<u8>> {
        let body = self.object(number)?;
        let dict = self.dictionary(number)?;
        let length: usize = capture_number(&self.patterns.length, &dict)
            .ok_or_else(|| Error::Corrupted(format!("stream {} has no /Length", number)))?;
        let start = find(body, b"stream\n")
            .map(|p| p + b"stream\n".len())
            .ok_or_else(|| Error::Corrupted(format!("object {} is not a stream", number)))?;
        let raw = start
            .checked_add(length)
            .and_then(|end| body.get(start..end))
            .ok_or_else(|| Error::Corrupted(format!("stream {} is truncated", number)))?;

        if dict.contains("/FlateDecode") {
            let mut inflated = Vec::new();
            ZlibDecoder::new(raw)
                .read_to_end(&mut inflated)
                .map_err(|e| Error::Compression(e.to_string()))?;
            Ok(inflated)
        } else {
            Ok(raw.to_vec())
        }
    }
}

/// Verify a buffer and summarize its structure.
///
/// Every xref offset must point at its object's `N 0 obj` marker.
pub fn inspect(data: &[u8]) -> Result<InspectReport> {
    let version = detect_version(data)?;
    let reader = Reader::open(data)?;

    let size: u32 = capture_number(&reader.patterns.size, &reader.trailer)
        .ok_or_else(|| Error::Corrupted("trailer has no /Size".to_string()))?;
    if size as usize != reader.offsets.len() + 1 {
        return Err(Error::Corrupted(format!(
            "trailer /Size {} disagrees with {} xref entries",
            size,
            reader.offsets.len() + 1
        )));
    }

    let root = reader.root()?;
    let info = capture_number(&reader.patterns.info, &reader.trailer);
    let page_count = capture_number(&reader.patterns.count, &reader.page_tree()?)
        .ok_or_else(|| Error::Corrupted("page tree has no /Count".to_string()))?;

    let mut compressed = false;
    for contents in reader.page_contents()? {
        compressed |= reader.dictionary(contents)?.contains("/FlateDecode");
    }

    Ok(InspectReport {
        version,
        byte_len: data.len(),
        object_count: size - 1,
        xref_offset: reader.xref_offset,
        root,
        info,
        page_count,
        compressed,
    })
}

/// Recover the shown lines of every page, in page-tree order.
///
/// Text is unescaped and decoded as UTF-8; blank-line placeholders come
/// back as a single space.
pub fn extract_lines(data: &[u8]) -> Result<Vec<Vec<String>>> {
    detect_version(data)?;
    let reader = Reader::open(data)?;

    let mut pages = Vec::new();
    for contents in reader.page_contents()? {
        let stream = reader.stream(contents)?;
        let text = String::from_utf8_lossy(&stream);

        let lines = text
            .lines()
            .filter_map(|op| op.strip_suffix(" Tj"))
            .filter_map(|op| op.strip_prefix('(')?.strip_suffix(')'))
            .map(unescape_pdf_string)
            .collect();
        pages.push(lines);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_version() {
        assert_eq!(detect_version(b"%PDF-1.4\n%test").unwrap(), "1.4");
        assert_eq!(detect_version(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_detect_version_errors() {
        assert!(matches!(detect_version(b""), Err(Error::UnknownFormat)));
        assert!(matches!(detect_version(b"%PDF-"), Err(Error::UnknownFormat)));
        assert!(matches!(
            detect_version(b"<!DOCTYPE html><html></html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_version(b"%PDF-9.9\n"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\ntest"));
        assert!(!is_pdf_bytes(b"Not a PDF file"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_inspect_missing_startxref() {
        let result = inspect(b"%PDF-1.4\n1 0 obj\n<< >>\nendobj\n");
        assert!(matches!(result, Err(Error::Corrupted(_))));
    }
}
