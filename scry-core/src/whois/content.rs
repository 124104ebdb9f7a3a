//! Decoding and normalization of raw registry responses.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Character set a registry publishes its responses in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    Latin1,
}

impl InputEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            InputEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            InputEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// The text of one registry response.
///
/// Holds the decoded text as received and a scanner view with `\n` line
/// endings, which is what extraction rules match against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    raw: String,
    scanner: String,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let scanner = normalize_line_endings(&raw);
        Self { raw, scanner }
    }

    pub fn decode(bytes: &[u8], encoding: InputEncoding) -> Self {
        debug!(?encoding, bytes = bytes.len(), "Decoding registry response");
        Self::new(encoding.decode(bytes))
    }

    /// The decoded response, unmodified.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The response with `\r\n` and lone `\r` folded to `\n`.
    pub fn for_scanner(&self) -> &str {
        &self.scanner
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
