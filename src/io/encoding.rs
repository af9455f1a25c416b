//! Text decoding with ordered fallbacks.
//!
//! Spreadsheet tools export CSVs in whatever code page the machine happens to
//! use. We try a short, fixed list of encodings in order and keep the first
//! one that decodes cleanly.

use std::borrow::Cow;

use encoding_rs::{UTF_8, WINDOWS_1252};

/// A candidate input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8; a leading BOM is stripped.
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    /// Windows code page 1252.
    Windows1252,
}

/// Default decode order.
pub const DEFAULT_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes` without replacement characters.
    pub fn decode(self, bytes: &[u8]) -> Result<String, String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(Cow::into_owned)
                    .ok_or_else(|| "'utf-8' codec can't decode the input (invalid byte sequence)".to_string())
            }
            TextEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            TextEncoding::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned)
                .ok_or_else(|| "'windows-1252' codec can't decode the input".to_string()),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
