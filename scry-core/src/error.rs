use thiserror::Error;

use crate::whois::{Kind, Property};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScryError {
    #[error("Property `{property}` is not implemented for {host}")]
    PropertyNotImplemented { property: Property, host: String },

    #[error("Property `{property}` on {host} produced a {found} value, expected {expected}")]
    PropertyTypeMismatch {
        property: Property,
        host: String,
        expected: Kind,
        found: Kind,
    },

    #[error("No parser registered for WHOIS host: {0}")]
    UnknownRegistry(String),

    #[error("Response too large: {size} bytes (limit {limit})")]
    ContentTooLarge { size: usize, limit: usize },
}

impl ScryError {
    /// Returns true when the error reports a gap in a parser's property coverage.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, ScryError::PropertyNotImplemented { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScryError>;
