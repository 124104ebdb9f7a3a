//! Format for whois.nic.hu (.hu).
//!
//! An unregistered domain is answered with a bilingual last line:
//!
//! ```text
//! Nincs találat / No match
//! ```
//!
//! Registered domains carry `registered:` and `changed:` lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::whois::contract::{Declarations, RegistryFormat};
use crate::whois::extract::{capture, last_line, parse_time};
use crate::whois::parser::Parser;
use crate::whois::property::{Property, Value};

static NO_MATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Nincs tal.lat / No match$").expect("Invalid nic.hu no match regex"));

static REGISTERED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*registered:[ \t]+(.+)$").expect("Invalid nic.hu registered regex")
});

static CHANGED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*changed:[ \t]+(.+)$").expect("Invalid nic.hu changed regex"));

/// Response format of whois.nic.hu.
#[derive(Debug, Clone, Copy, Default)]
pub struct NicHuFormat;

impl RegistryFormat for NicHuFormat {
    fn host(&self) -> &'static str {
        "whois.nic.hu"
    }

    fn declare(&self, declarations: &mut Declarations) {
        declarations
            .supported(Property::Available, available)
            .supported(Property::CreatedOn, created_on)
            .supported(Property::UpdatedOn, updated_on);
    }
}

fn available(parser: &Parser) -> Result<Value> {
    let no_match = last_line(parser.text()).is_some_and(|line| NO_MATCH.is_match(line));
    Ok(Value::Bool(no_match))
}

fn created_on(parser: &Parser) -> Result<Value> {
    Ok(Value::Time(capture(&REGISTERED_PATTERN, parser.text()).and_then(parse_time)))
}

fn updated_on(parser: &Parser) -> Result<Value> {
    Ok(Value::Time(capture(&CHANGED_PATTERN, parser.text()).and_then(parse_time)))
}
