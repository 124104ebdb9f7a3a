//! Ingestion settings for building parsers from raw bytes.

use crate::error::{Result, ScryError};
use crate::whois::InputEncoding;

/// Largest response accepted by default, matching the transport's read cap.
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 1024 * 1024;

/// Configuration applied when a response is handed to a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum response size in bytes.
    pub max_content_size: usize,
    /// Decoding to use instead of the one the registry format declares.
    pub encoding_override: Option<InputEncoding>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
            encoding_override: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_content_size(mut self, limit: usize) -> Self {
        self.max_content_size = limit;
        self
    }

    pub fn with_encoding(mut self, encoding: InputEncoding) -> Self {
        self.encoding_override = Some(encoding);
        self
    }

    /// Picks the override if set, otherwise the registry's declared encoding.
    pub fn encoding_for(&self, declared: InputEncoding) -> InputEncoding {
        self.encoding_override.unwrap_or(declared)
    }

    pub(crate) fn check_size(&self, size: usize) -> Result<()> {
        if size > self.max_content_size {
            return Err(ScryError::ContentTooLarge {
                size,
                limit: self.max_content_size,
            });
        }
        Ok(())
    }
}
