//! Format for whois.denic.de (.de).
//!
//! DENIC prints `Key: value` lines, with contacts in bracketed sections:
//!
//! ```text
//! Domain: example.de
//! Nserver: ns1.example.de 192.0.2.1
//! Nserver: ns2.example.de
//! Status: connect
//! Changed: 2023-01-15T10:30:00+01:00
//!
//! [Holder]
//! Type: PERSON
//! Name: Max Mustermann
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::whois::contract::{Declarations, RegistryFormat};
use crate::whois::extract::{capture, labeled_block, parse_time, NameserverList};
use crate::whois::parser::Parser;
use crate::whois::property::{Property, Value};
use crate::whois::types::{Contact, ContactRole};

static DOMAIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^Domain:[ \t]*(.+)$").expect("Invalid DENIC domain regex"));

static STATUS_FREE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^Status:[ \t]*free[ \t]*$").expect("Invalid DENIC status regex"));

static CHANGED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^Changed:[ \t]*(.+)$").expect("Invalid DENIC changed regex"));

static NSERVER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^Nserver:[ \t]*(.+)$").expect("Invalid DENIC nserver regex"));

static HOLDER_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[Holder\]$").expect("Invalid DENIC holder regex"));

static ADMIN_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[Admin-C\]$").expect("Invalid DENIC admin regex"));

static TECH_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[Tech-C\]$").expect("Invalid DENIC tech regex"));

/// Response format of whois.denic.de.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenicFormat;

impl RegistryFormat for DenicFormat {
    fn host(&self) -> &'static str {
        "whois.denic.de"
    }

    fn declare(&self, declarations: &mut Declarations) {
        declarations
            .supported(Property::Disclaimer, disclaimer)
            .supported(Property::Domain, domain)
            // DENIC publishes neither the registrar nor creation/expiry dates.
            .not_supported(Property::Registrar)
            .not_supported(Property::CreatedOn)
            .not_supported(Property::ExpiresOn)
            .supported(Property::Available, available)
            .supported(Property::UpdatedOn, updated_on)
            .supported(Property::RegistrantContacts, registrant_contacts)
            .supported(Property::AdminContacts, admin_contacts)
            .supported(Property::TechnicalContacts, technical_contacts)
            .supported(Property::Nameservers, nameservers);
    }
}

/// Leading `%` comment lines, joined with spaces.
fn disclaimer(parser: &Parser) -> Result<Value> {
    let lines: Vec<&str> = parser
        .text()
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| line.starts_with('%'))
        .map(|line| line.trim_start_matches('%').trim())
        .filter(|line| !line.is_empty())
        .collect();
    let text = if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    };
    Ok(Value::Text(text))
}

fn domain(parser: &Parser) -> Result<Value> {
    Ok(Value::Text(
        capture(&DOMAIN_PATTERN, parser.text()).map(str::to_lowercase),
    ))
}

fn available(parser: &Parser) -> Result<Value> {
    Ok(Value::Bool(STATUS_FREE.is_match(parser.text())))
}

fn updated_on(parser: &Parser) -> Result<Value> {
    Ok(Value::Time(capture(&CHANGED_PATTERN, parser.text()).and_then(parse_time)))
}

fn registrant_contacts(parser: &Parser) -> Result<Value> {
    Ok(section_contact(parser, &HOLDER_SECTION, ContactRole::Registrant))
}

fn admin_contacts(parser: &Parser) -> Result<Value> {
    Ok(section_contact(parser, &ADMIN_SECTION, ContactRole::Admin))
}

fn technical_contacts(parser: &Parser) -> Result<Value> {
    Ok(section_contact(parser, &TECH_SECTION, ContactRole::Technical))
}

/// Reads the `Key: value` lines of a bracketed contact section.
fn section_contact(parser: &Parser, section: &Regex, role: ContactRole) -> Value {
    let Some(lines) = labeled_block(parser.text(), section) else {
        return Value::Contacts(Vec::new());
    };

    let field = |key: &str| {
        lines.iter().find_map(|line| {
            let (k, v) = line.split_once(':')?;
            let v = v.trim();
            (k.trim().eq_ignore_ascii_case(key) && !v.is_empty()).then(|| v.to_string())
        })
    };

    let contact = Contact::new(role)
        .with_name(field("Name"))
        .with_organization(field("Organisation").or_else(|| field("Organization")))
        .with_address(field("Address"))
        .with_city(field("City"))
        .with_zip(field("PostalCode"))
        .with_country(field("CountryCode"));

    if contact.is_empty() {
        Value::Contacts(Vec::new())
    } else {
        Value::Contacts(vec![contact])
    }
}

/// `Nserver:` lines, each a host optionally followed by glue addresses.
fn nameservers(parser: &Parser) -> Result<Value> {
    let mut list = NameserverList::new();
    for caps in NSERVER_PATTERN.captures_iter(parser.text()) {
        if let Some(m) = caps.get(1) {
            list.push_spaced_line(&m.as_str().to_lowercase());
        }
    }
    Ok(Value::Nameservers(list.into_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const SAMPLE_DENIC_RESPONSE: &str = r#"
% Restricted rights.
%
% Terms and Conditions of Use

Domain: example.de
Nserver: ns1.example.de 192.0.2.1
Nserver: NS2.example.de
Nserver: ns1.example.de 2001:db8::1
Status: connect
Changed: 2023-01-15T10:30:00+01:00

[Holder]
Type: PERSON
Name: Max Mustermann
Address: Musterstraße 1
PostalCode: 12345
City: Musterstadt
CountryCode: DE

[Tech-C]
Type: ROLE
Name: Technical Contact
Organisation: Example Hosting GmbH
"#;

    const SAMPLE_FREE: &str = "Domain: available-example.de\nStatus: free\n";

    fn parse(text: &str) -> Parser {
        Parser::new(&DenicFormat, text)
    }

    #[test]
    fn test_denic_basic() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        assert_eq!(parser.domain().unwrap(), Some("example.de"));
        assert!(!parser.available().unwrap());
        assert!(parser.registered().unwrap());
    }

    #[test]
    fn test_denic_free() {
        let parser = parse(SAMPLE_FREE);
        assert!(parser.available().unwrap());
        assert!(parser.nameservers().unwrap().is_empty());
        assert!(parser.registrant_contacts().unwrap().is_empty());
    }

    #[test]
    fn test_denic_disclaimer() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        assert_eq!(
            parser.disclaimer().unwrap(),
            Some("Restricted rights. Terms and Conditions of Use")
        );
    }

    #[test]
    fn test_denic_updated_date() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        let dt = parser.updated_on().unwrap().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 1, 15));
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_denic_not_supported() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        assert_eq!(parser.registrar().unwrap(), None);
        assert_eq!(parser.created_on().unwrap(), None);
        assert_eq!(parser.expires_on().unwrap(), None);
    }

    #[test]
    fn test_denic_nameservers_merge_addresses() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        let nameservers = parser.nameservers().unwrap();

        assert_eq!(nameservers.len(), 2);
        assert_eq!(nameservers[0].name, "ns1.example.de");
        assert_eq!(nameservers[0].ipv4, Some("192.0.2.1".parse().unwrap()));
        assert_eq!(nameservers[0].ipv6, Some("2001:db8::1".parse().unwrap()));
        assert_eq!(nameservers[1].name, "ns2.example.de");
        assert!(!nameservers[1].has_addresses());
    }

    #[test]
    fn test_denic_holder() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        let holder = &parser.registrant_contacts().unwrap()[0];

        assert_eq!(holder.role(), ContactRole::Registrant);
        assert_eq!(holder.name(), Some("Max Mustermann"));
        assert_eq!(holder.address(), Some("Musterstraße 1"));
        assert_eq!(holder.zip(), Some("12345"));
        assert_eq!(holder.city(), Some("Musterstadt"));
        assert_eq!(holder.country(), Some("DE"));
    }

    #[test]
    fn test_denic_tech_and_admin() {
        let parser = parse(SAMPLE_DENIC_RESPONSE);
        let tech = parser.technical_contacts().unwrap();
        assert_eq!(tech.len(), 1);
        assert_eq!(tech[0].organization(), Some("Example Hosting GmbH"));

        assert!(parser.admin_contacts().unwrap().is_empty());
    }
}
