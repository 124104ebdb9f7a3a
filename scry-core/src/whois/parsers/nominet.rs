//! Format for whois.nic.uk (Nominet, .uk).
//!
//! Nominet uses indented sections with human-readable dates:
//!
//! ```text
//!     Domain name:
//!         example.co.uk
//!
//!     Registrant:
//!         Example Ltd
//!
//!     Registrant's address:
//!         1 High Street
//!         London
//!         EC1A 1AA
//!         United Kingdom
//!
//!     Relevant dates:
//!         Registered on: 01-Jan-2020
//!         Expiry date:  01-Jan-2025
//!         Last updated:  15-Jun-2023
//!
//!     Name servers:
//!         ns1.example.co.uk
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::whois::contract::{Declarations, RegistryFormat};
use crate::whois::extract::{capture, labeled_block, parse_time, NameserverList};
use crate::whois::parser::Parser;
use crate::whois::property::{Property, Value};
use crate::whois::types::{Contact, ContactRole};

static NO_MATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*No match for ""#).expect("Invalid Nominet no match regex"));

static DOMAIN_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Domain name:$").expect("Invalid Nominet domain regex"));

static REGISTRANT_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Registrant:$").expect("Invalid Nominet registrant regex"));

static ADDRESS_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Registrant's address:$").expect("Invalid Nominet address regex")
});

static REGISTRAR_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Registrar:$").expect("Invalid Nominet registrar regex"));

static NAME_SERVERS_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Name servers:$").expect("Invalid Nominet name servers regex")
});

// Dates are either inline under "Relevant dates:" or a section of their own.
static REGISTERED_ON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*(?:Registered on|Registration date):\s*(.+)$")
        .expect("Invalid Nominet registration date regex")
});

static EXPIRY_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*Expiry date:\s*(.+)$").expect("Invalid Nominet expiry date regex")
});

static LAST_UPDATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*Last updated:\s*(.+)$").expect("Invalid Nominet last updated regex")
});

/// Response format of whois.nic.uk.
#[derive(Debug, Clone, Copy, Default)]
pub struct NominetFormat;

impl RegistryFormat for NominetFormat {
    fn host(&self) -> &'static str {
        "whois.nic.uk"
    }

    fn declare(&self, declarations: &mut Declarations) {
        declarations
            .supported(Property::Domain, domain)
            .supported(Property::Registrar, registrar)
            .supported(Property::Available, available)
            .supported(Property::CreatedOn, created_on)
            .supported(Property::UpdatedOn, updated_on)
            .supported(Property::ExpiresOn, expires_on)
            .supported(Property::RegistrantContacts, registrant_contacts)
            .not_supported(Property::AdminContacts)
            .not_supported(Property::TechnicalContacts)
            .supported(Property::Nameservers, nameservers);
    }
}

fn first_line(parser: &Parser, section: &Regex) -> Option<String> {
    labeled_block(parser.text(), section)?
        .first()
        .map(|line| line.to_string())
}

fn domain(parser: &Parser) -> Result<Value> {
    Ok(Value::Text(
        first_line(parser, &DOMAIN_SECTION).map(|d| d.to_lowercase()),
    ))
}

/// The registrar name without its `[Tag = ...]` suffix.
fn registrar(parser: &Parser) -> Result<Value> {
    let name = first_line(parser, &REGISTRAR_SECTION)
        .map(|line| line.split('[').next().unwrap_or(&line).trim().to_string())
        .filter(|name| !is_redacted(name));
    Ok(Value::Text(name))
}

fn available(parser: &Parser) -> Result<Value> {
    Ok(Value::Bool(NO_MATCH.is_match(parser.text())))
}

fn created_on(parser: &Parser) -> Result<Value> {
    Ok(Value::Time(capture(&REGISTERED_ON, parser.text()).and_then(parse_time)))
}

fn updated_on(parser: &Parser) -> Result<Value> {
    Ok(Value::Time(capture(&LAST_UPDATED, parser.text()).and_then(parse_time)))
}

fn expires_on(parser: &Parser) -> Result<Value> {
    Ok(Value::Time(capture(&EXPIRY_DATE, parser.text()).and_then(parse_time)))
}

/// The registrant name plus the address block, read from its end:
/// country, postcode, city, then the street lines.
fn registrant_contacts(parser: &Parser) -> Result<Value> {
    let Some(name) = first_line(parser, &REGISTRANT_SECTION).filter(|n| !is_redacted(n)) else {
        return Ok(Value::Contacts(Vec::new()));
    };

    let mut contact = Contact::new(ContactRole::Registrant).with_name(Some(name));

    if let Some(mut lines) = labeled_block(parser.text(), &ADDRESS_SECTION) {
        if !lines.iter().any(|line| is_redacted(line)) {
            let mut from_end = || lines.pop().map(str::to_string);
            let country = from_end();
            let zip = from_end();
            let city = from_end();
            contact = contact.with_country(country).with_zip(zip).with_city(city);
            if !lines.is_empty() {
                contact = contact.with_address(Some(lines.join(", ")));
            }
        }
    }

    Ok(Value::Contacts(vec![contact]))
}

/// Glue addresses may follow the host on the same line.
fn nameservers(parser: &Parser) -> Result<Value> {
    let mut list = NameserverList::new();
    for line in labeled_block(parser.text(), &NAME_SERVERS_SECTION).unwrap_or_default() {
        list.push_spaced_line(&line.to_lowercase());
    }
    Ok(Value::Nameservers(list.into_vec()))
}

/// Checks if a value is a privacy/redaction placeholder.
fn is_redacted(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("redacted")
        || lower.contains("data protected")
        || lower.contains("not disclosed")
        || lower.contains("withheld")
        || lower.contains("omitted")
        || lower == "n/a"
        || lower == "none"
        || value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const SAMPLE_NOMINET_RESPONSE: &str = r#"
    Domain name:
        example.co.uk

    Registrant:
        Example Ltd

    Registrant type:
        UK Limited Company, (Company number: 01234567)

    Registrant's address:
        1 High Street
        Suite 5
        London
        EC1A 1AA
        United Kingdom

    Registrar:
        Registrar Name Ltd [Tag = REGISTRAR]
        URL: https://registrar.example

    Relevant dates:
        Registered on: 01-Jan-2020
        Expiry date:  01-Jan-2025
        Last updated:  15-Jun-2023

    Registration status:
        Registered until expiry date.

    Name servers:
        ns1.example.co.uk       192.0.2.10
        NS2.example.co.uk

    WHOIS lookup made at 10:00:00 01-Jan-2024
"#;

    // Alternative layout with every date in its own section.
    const SAMPLE_SECTIONED_DATES: &str = r#"
Domain name:
    example.co.uk

Registrant:
    Test Company

Registrant's address:
    The registrant is a non-trading individual who has opted to have their
    address omitted from the WHOIS service.

Registration date:
    15-March-2019

Expiry date:
    15-March-2024

Last updated:
    10-October-2023
"#;

    const SAMPLE_NO_MATCH: &str = r#"
    No match for "available-example.co.uk".

    This domain name has not been registered.
"#;

    fn parse(text: &str) -> Parser {
        Parser::new(&NominetFormat, text)
    }

    #[test]
    fn test_nominet_basic() {
        let parser = parse(SAMPLE_NOMINET_RESPONSE);
        assert_eq!(parser.domain().unwrap(), Some("example.co.uk"));
        assert_eq!(parser.registrar().unwrap(), Some("Registrar Name Ltd"));
        assert!(!parser.available().unwrap());
        assert!(parser.registered().unwrap());
    }

    #[test]
    fn test_nominet_no_match() {
        let parser = parse(SAMPLE_NO_MATCH);
        assert!(parser.available().unwrap());
        assert!(parser.registrant_contacts().unwrap().is_empty());
        assert_eq!(parser.created_on().unwrap(), None);
    }

    #[test]
    fn test_nominet_inline_dates() {
        let parser = parse(SAMPLE_NOMINET_RESPONSE);

        let created = parser.created_on().unwrap().unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2020, 1, 1));

        let expires = parser.expires_on().unwrap().unwrap();
        assert_eq!((expires.year(), expires.month(), expires.day()), (2025, 1, 1));

        let updated = parser.updated_on().unwrap().unwrap();
        assert_eq!((updated.year(), updated.month(), updated.day()), (2023, 6, 15));
    }

    #[test]
    fn test_nominet_sectioned_dates() {
        let parser = parse(SAMPLE_SECTIONED_DATES);

        let created = parser.created_on().unwrap().unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2019, 3, 15));

        let updated = parser.updated_on().unwrap().unwrap();
        assert_eq!((updated.year(), updated.month(), updated.day()), (2023, 10, 10));
    }

    #[test]
    fn test_nominet_registrant_address() {
        let parser = parse(SAMPLE_NOMINET_RESPONSE);
        let registrant = &parser.registrant_contacts().unwrap()[0];

        assert_eq!(registrant.name(), Some("Example Ltd"));
        assert_eq!(registrant.address(), Some("1 High Street, Suite 5"));
        assert_eq!(registrant.city(), Some("London"));
        assert_eq!(registrant.zip(), Some("EC1A 1AA"));
        assert_eq!(registrant.country(), Some("United Kingdom"));
    }

    #[test]
    fn test_nominet_omitted_address() {
        let parser = parse(SAMPLE_SECTIONED_DATES);
        let registrant = &parser.registrant_contacts().unwrap()[0];

        assert_eq!(registrant.name(), Some("Test Company"));
        assert_eq!(registrant.address(), None);
        assert_eq!(registrant.country(), None);
    }

    #[test]
    fn test_nominet_nameservers() {
        let parser = parse(SAMPLE_NOMINET_RESPONSE);
        let nameservers = parser.nameservers().unwrap();

        assert_eq!(nameservers.len(), 2);
        assert_eq!(nameservers[0].name, "ns1.example.co.uk");
        assert_eq!(nameservers[0].ipv4, Some("192.0.2.10".parse().unwrap()));
        assert_eq!(nameservers[1].name, "ns2.example.co.uk");
    }

    #[test]
    fn test_nominet_contacts_not_supported() {
        let parser = parse(SAMPLE_NOMINET_RESPONSE);
        assert!(parser.admin_contacts().unwrap().is_empty());
        assert!(parser.technical_contacts().unwrap().is_empty());
    }

    #[test]
    fn test_redaction_detection() {
        assert!(is_redacted("REDACTED FOR PRIVACY"));
        assert!(is_redacted("Data protected"));
        assert!(is_redacted("Not disclosed"));
        assert!(is_redacted("address omitted from the WHOIS service."));
        assert!(!is_redacted("Example Ltd"));
    }
}
