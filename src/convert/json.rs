//! JSON input, rendered as pretty-printed text.

use super::{decode_utf8, TextConverter};
use crate::error::{Error, Result};

/// Pretty-prints a JSON document so each field lands on its own line.
#[derive(Debug, Clone, Default)]
pub struct JsonConverter {
    _private: (),
}

impl JsonConverter {
    /// Create a new JSON converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextConverter for JsonConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn to_text(&self, bytes: &[u8]) -> Result<String> {
        let text = decode_utf8(bytes)?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| Error::UnsupportedInput(format!("invalid JSON: {}", e)))?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_pretty_prints() {
        let converter = JsonConverter::new();
        let text = converter
            .to_text(br#"{"name":"Ada","skills":["math","engines"]}"#)
            .unwrap();
        assert!(text.contains("\n  \"name\": \"Ada\""));
        assert!(text.lines().count() > 3);
    }

    #[test]
    fn test_json_invalid() {
        let converter = JsonConverter::new();
        assert!(matches!(
            converter.to_text(b"{not json"),
            Err(Error::UnsupportedInput(_))
        ));
    }
}
