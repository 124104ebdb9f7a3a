//! Registry-specific WHOIS response formats.
//!
//! Every registry prints its own layout, so each WHOIS host gets a
//! [`RegistryFormat`] declaring which properties it can extract. The
//! [`ParserRegistry`] maps hosts to formats and builds a [`Parser`] for a
//! single response.

mod denic;
mod nic_ch;
mod nic_hu;
mod nominet;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::contract::RegistryFormat;
use super::parser::Parser;
use crate::error::{Result, ScryError};
use crate::options::ParseOptions;
pub use denic::DenicFormat;
pub use nic_ch::NicChFormat;
pub use nic_hu::NicHuFormat;
pub use nominet::NominetFormat;

/// Registry of known response formats, keyed by WHOIS host.
pub struct ParserRegistry {
    formats: HashMap<String, Box<dyn RegistryFormat>>,
}

impl ParserRegistry {
    /// Creates a registry holding every built-in format.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(NicChFormat)); // .ch, .li
        registry.register(Box::new(NicHuFormat)); // .hu
        registry.register(Box::new(DenicFormat)); // .de
        registry.register(Box::new(NominetFormat)); // .uk
        registry
    }

    /// Creates a registry with no formats.
    pub fn empty() -> Self {
        Self {
            formats: HashMap::new(),
        }
    }

    /// Adds a format, replacing any format already registered for its host.
    pub fn register(&mut self, format: Box<dyn RegistryFormat>) -> &mut Self {
        let host = format.host().to_lowercase();
        if self.formats.insert(host.clone(), format).is_some() {
            warn!(host = %host, "Replacing registered format");
        }
        self
    }

    /// Returns the format for `host`, ignoring case.
    pub fn format(&self, host: &str) -> Option<&dyn RegistryFormat> {
        self.formats
            .get(&host.trim().to_lowercase())
            .map(|format| format.as_ref())
    }

    pub fn supports(&self, host: &str) -> bool {
        self.format(host).is_some()
    }

    /// Registered hosts, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        hosts.sort_unstable();
        hosts
    }

    /// Builds a parser for a decoded response from `host`.
    pub fn parser(&self, host: &str, text: &str) -> Result<Parser> {
        let format = self.require(host)?;
        Ok(Parser::new(format, text))
    }

    /// Builds a parser for raw response bytes from `host`, decoding them with
    /// the registry's declared encoding.
    pub fn parser_from_bytes(
        &self,
        host: &str,
        bytes: &[u8],
        options: &ParseOptions,
    ) -> Result<Parser> {
        let format = self.require(host)?;
        Parser::from_bytes(format, bytes, options)
    }

    fn require(&self, host: &str) -> Result<&dyn RegistryFormat> {
        let format = self
            .format(host)
            .ok_or_else(|| ScryError::UnknownRegistry(host.to_string()))?;
        debug!(host = %format.host(), "Selected registry format");
        Ok(format)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry of the built-in formats.
pub static PARSER_REGISTRY: Lazy<ParserRegistry> = Lazy::new(ParserRegistry::new);
