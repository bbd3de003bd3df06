use std::fmt;

use encoding_rs::WINDOWS_1252;

/// Which entry in the fallback chain decoded the upload.
///
/// Recorded for diagnostics only; extraction does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8 with a leading byte-order mark, stripped before parsing.
    Utf8Bom,
    /// Plain UTF-8.
    Utf8,
    /// Latin-1 (decoded as WHATWG windows-1252, the superset exporters
    /// actually produce).
    Latin1,
    /// UTF-8 with undecodable bytes replaced, the last resort.
    Utf8Lossy,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8Bom => "utf-8-sig",
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "latin-1",
            SourceEncoding::Utf8Lossy => "utf-8 (lossy)",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decode uploaded bytes, trying each supported encoding in priority order.
///
/// The chain always terminates: Latin-1 assigns a character to every byte and
/// lossy UTF-8 replaces anything left over, so decoding itself cannot fail.
/// An empty or non-tabular result is caught later as a parse error.
///
/// # Arguments
/// * `raw` - The uploaded file content
///
/// # Returns
/// * `(String, SourceEncoding)` - The decoded text and which encoding matched
pub fn decode_upload(raw: &[u8]) -> (String, SourceEncoding) {
    if let Some(rest) = raw.strip_prefix(&UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return (text.to_string(), SourceEncoding::Utf8Bom);
        }
    }

    if let Ok(text) = std::str::from_utf8(raw) {
        return (text.to_string(), SourceEncoding::Utf8);
    }

    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(raw);
    if !had_errors {
        return (text.into_owned(), SourceEncoding::Latin1);
    }

    (String::from_utf8_lossy(raw).into_owned(), SourceEncoding::Utf8Lossy)
}
