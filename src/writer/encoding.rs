//! Byte encodings for text shown on a page.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};

use crate::model::FontEncoding;

/// How line text is turned into content-stream bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Embed the UTF-8 bytes unchanged; the font declares no encoding.
    #[default]
    Utf8,
    /// Encode as Windows-1252 and declare `/WinAnsiEncoding` on the font.
    WinAnsi,
}

impl TextEncoding {
    /// Encoding entry for the font dictionary.
    pub fn font_encoding(self) -> Option<FontEncoding> {
        match self {
            TextEncoding::Utf8 => None,
            TextEncoding::WinAnsi => Some(FontEncoding::WinAnsi),
        }
    }

    /// Encode `text`, returning the first character that has no code in
    /// this encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, char> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::WinAnsi => {
                let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
                if had_errors {
                    return Err(first_unmappable(text));
                }
                Ok(bytes.into_owned())
            }
        }
    }
}

fn first_unmappable(text: &str) -> char {
    let mut buf = [0u8; 4];
    text.chars()
        .find(|c| WINDOWS_1252.encode(c.encode_utf8(&mut buf)).2)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(
            TextEncoding::Utf8.encode("café").unwrap(),
            "café".as_bytes().to_vec()
        );
        assert_eq!(TextEncoding::Utf8.font_encoding(), None);
    }

    #[test]
    fn test_win_ansi_latin1_and_specials() {
        let bytes = TextEncoding::WinAnsi.encode("café – €5").unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9, b' ', 0x96, b' ', 0x80, b'5']);
    }

    #[test]
    fn test_win_ansi_rejects_unmapped() {
        assert_eq!(TextEncoding::WinAnsi.encode("ok 한"), Err('한'));
        assert_eq!(TextEncoding::WinAnsi.encode("αβ"), Err('α'));
        assert_eq!(TextEncoding::WinAnsi.encode("fine, then ✓ and Ω"), Err('✓'));
    }
}
