//! Content stream construction for a single page.

use super::TextEncoding;
use crate::error::{Error, Result};
use crate::layout::LayoutOptions;
use crate::model::FONT_ALIAS;

/// Escape a string for use inside a PDF literal string `( ... )`.
///
/// Backslashes are doubled and both parentheses get a backslash prefix.
pub fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Invert [`escape_pdf_string`].
///
/// Only the three escapes this crate writes are recognized; any other
/// backslash sequence is kept verbatim.
pub fn unescape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('\\' | '(' | ')')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Builds the drawing instructions for one page.
#[derive(Debug, Clone, Copy)]
pub struct ContentBuilder<'a> {
    layout: &'a LayoutOptions,
    encoding: TextEncoding,
}

impl<'a> ContentBuilder<'a> {
    pub fn new(layout: &'a LayoutOptions, encoding: TextEncoding) -> Self {
        Self { layout, encoding }
    }

    /// Build the uncompressed content stream for page `page_number`.
    ///
    /// Blank and whitespace-only lines are shown as a single space so they
    /// still advance one line.
    pub fn build(&self, page_number: u32, lines: &[String]) -> Result<Vec<u8>> {
        let mut ops: Vec<Vec<u8>> = Vec::with_capacity(lines.len() * 2 + 5);
        ops.push(b"BT".to_vec());
        ops.push(format!("/{} {} Tf", FONT_ALIAS, self.layout.font_size).into_bytes());
        ops.push(format!("{} TL", self.layout.leading).into_bytes());
        ops.push(format!("{} {} Td", self.layout.origin_x, self.layout.origin_y).into_bytes());

        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                ops.push(b"T*".to_vec());
            }
            ops.push(self.show_text(page_number, index + 1, line)?);
        }
        if lines.is_empty() {
            ops.push(b"( ) Tj".to_vec());
        }

        ops.push(b"ET".to_vec());
        Ok(ops.join(&b'\n'))
    }

    fn show_text(&self, page_number: u32, line_number: usize, line: &str) -> Result<Vec<u8>> {
        let shown = if line.trim().is_empty() {
            " ".to_string()
        } else {
            escape_pdf_string(line)
        };

        let encoded = self.encoding.encode(&shown).map_err(|c| {
            Error::Encoding(format!(
                "{:?} (U+{:04X}) on page {}, line {} has no {:?} code",
                c, c as u32, page_number, line_number, self.encoding
            ))
        })?;

        let mut op = Vec::with_capacity(encoded.len() + 6);
        op.push(b'(');
        op.extend_from_slice(&encoded);
        op.extend_from_slice(b") Tj");
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_pdf_string(r"a(b)c\d"), r"a\(b\)c\\d");
    }

    #[test]
    fn test_escape_round_trip() {
        let original = r"f(x) = \frac{(a)}{b} \\ end)";
        assert_eq!(unescape_pdf_string(&escape_pdf_string(original)), original);
    }

    #[test]
    fn test_build_instructions() {
        let layout = LayoutOptions::default();
        let builder = ContentBuilder::new(&layout, TextEncoding::Utf8);
        let stream = builder.build(1, &lines(&["Hello", "", "(x)"])).unwrap();

        let expected = "BT\n/F1 8 Tf\n13 TL\n40 750 Td\n(Hello) Tj\nT*\n( ) Tj\nT*\n(\\(x\\)) Tj\nET";
        assert_eq!(String::from_utf8(stream).unwrap(), expected);
    }

    #[test]
    fn test_whitespace_line_is_placeholder() {
        let layout = LayoutOptions::default();
        let builder = ContentBuilder::new(&layout, TextEncoding::Utf8);
        let stream = builder.build(1, &lines(&["   \t"])).unwrap();
        assert!(String::from_utf8(stream).unwrap().contains("\n( ) Tj\n"));
    }

    #[test]
    fn test_utf8_bytes_embedded() {
        let layout = LayoutOptions::default();
        let builder = ContentBuilder::new(&layout, TextEncoding::Utf8);
        let stream = builder.build(1, &lines(&["naïve"])).unwrap();
        let text = String::from_utf8(stream).unwrap();
        assert!(text.contains("(naïve) Tj"));
    }

    #[test]
    fn test_win_ansi_failure_names_location() {
        let layout = LayoutOptions::default();
        let builder = ContentBuilder::new(&layout, TextEncoding::WinAnsi);
        let err = builder.build(3, &lines(&["ok", "日本"])).unwrap_err();
        match err {
            Error::Encoding(msg) => {
                assert!(msg.contains("page 3"));
                assert!(msg.contains("line 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
