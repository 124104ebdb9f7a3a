//! Format for whois.nic.ch (SWITCH, .ch and .li).
//!
//! Contacts are printed as bare lines under a label, in ISO-8859-1:
//!
//! ```text
//! Holder of domain name:
//! [Organization]
//! Name
//! Address
//! Postal code and city
//! Country
//! Contractual Language: language
//!
//! Technical contact:
//! [Organization]
//! Name
//! Address
//! Postal code and city
//! Country
//!
//! Name servers:
//! ns1.citrin.ch
//! ns1.citrin.ch	[193.247.72.8]
//! ```
//!
//! The holder and technical blocks are exposed as two separate properties.
//! Older parsers for this registry bound both blocks to the registrant
//! contacts, so the technical block silently replaced the holder.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::whois::content::InputEncoding;
use crate::whois::contract::{Declarations, RegistryFormat};
use crate::whois::extract::{contact_from_block, labeled_block, ContactLayout, NameserverList};
use crate::whois::parser::Parser;
use crate::whois::property::{Property, Value};
use crate::whois::types::ContactRole;

static AVAILABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"We do not have an entry").expect("Invalid nic.ch available regex"));

static HOLDER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Holder of domain name:$").expect("Invalid nic.ch holder regex")
});

static TECHNICAL_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Technical contact:$").expect("Invalid nic.ch technical contact regex")
});

static NAMESERVERS_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Name servers:$").expect("Invalid nic.ch name servers regex"));

/// The holder block ends with a "Contractual Language" line.
const HOLDER_LAYOUT: ContactLayout = ContactLayout::new(1);
const TECHNICAL_LAYOUT: ContactLayout = ContactLayout::new(0);

/// Response format of whois.nic.ch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NicChFormat;

impl RegistryFormat for NicChFormat {
    fn host(&self) -> &'static str {
        "whois.nic.ch"
    }

    fn encoding(&self) -> InputEncoding {
        InputEncoding::Latin1
    }

    fn declare(&self, declarations: &mut Declarations) {
        declarations
            .supported(Property::Available, available)
            .not_supported(Property::CreatedOn)
            .not_supported(Property::UpdatedOn)
            .not_supported(Property::ExpiresOn)
            .supported(Property::RegistrantContacts, registrant_contacts)
            .not_supported(Property::AdminContacts)
            .supported(Property::TechnicalContacts, technical_contacts)
            .supported(Property::Nameservers, nameservers);
    }
}

fn available(parser: &Parser) -> Result<Value> {
    Ok(Value::Bool(AVAILABLE_PATTERN.is_match(parser.text())))
}

fn registrant_contacts(parser: &Parser) -> Result<Value> {
    Ok(block_contact(parser, &HOLDER_LABEL, ContactRole::Registrant, HOLDER_LAYOUT))
}

fn technical_contacts(parser: &Parser) -> Result<Value> {
    Ok(block_contact(parser, &TECHNICAL_LABEL, ContactRole::Technical, TECHNICAL_LAYOUT))
}

fn block_contact(parser: &Parser, label: &Regex, role: ContactRole, layout: ContactLayout) -> Value {
    let contacts = labeled_block(parser.text(), label)
        .and_then(|lines| contact_from_block(&lines, role, layout))
        .into_iter()
        .collect();
    Value::Contacts(contacts)
}

fn nameservers(parser: &Parser) -> Result<Value> {
    let list: NameserverList = labeled_block(parser.text(), &NAMESERVERS_LABEL)
        .unwrap_or_default()
        .into_iter()
        .collect();
    Ok(Value::Nameservers(list.into_vec()))
}
