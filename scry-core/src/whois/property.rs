//! The closed set of properties a registry parser can answer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Contact, ContactRole, DomainStatus, Nameserver};

/// A named field of registration data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Disclaimer,
    Domain,
    DomainId,
    Registrar,
    Status,
    Available,
    Registered,
    CreatedOn,
    UpdatedOn,
    ExpiresOn,
    RegistrantContacts,
    AdminContacts,
    TechnicalContacts,
    Nameservers,
}

impl Property {
    pub const COUNT: usize = 14;

    pub const ALL: [Property; Property::COUNT] = [
        Property::Disclaimer,
        Property::Domain,
        Property::DomainId,
        Property::Registrar,
        Property::Status,
        Property::Available,
        Property::Registered,
        Property::CreatedOn,
        Property::UpdatedOn,
        Property::ExpiresOn,
        Property::RegistrantContacts,
        Property::AdminContacts,
        Property::TechnicalContacts,
        Property::Nameservers,
    ];

    /// Position of the property in [`Property::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn kind(self) -> Kind {
        match self {
            Property::Disclaimer | Property::Domain | Property::DomainId | Property::Registrar => {
                Kind::Text
            }
            Property::Status => Kind::Status,
            Property::Available | Property::Registered => Kind::Bool,
            Property::CreatedOn | Property::UpdatedOn | Property::ExpiresOn => Kind::Time,
            Property::RegistrantContacts
            | Property::AdminContacts
            | Property::TechnicalContacts => Kind::Contacts,
            Property::Nameservers => Kind::Nameservers,
        }
    }

    /// The contacts property holding contacts of `role`.
    pub fn for_role(role: ContactRole) -> Property {
        match role {
            ContactRole::Registrant => Property::RegistrantContacts,
            ContactRole::Admin => Property::AdminContacts,
            ContactRole::Technical => Property::TechnicalContacts,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::Disclaimer => "disclaimer",
            Property::Domain => "domain",
            Property::DomainId => "domain_id",
            Property::Registrar => "registrar",
            Property::Status => "status",
            Property::Available => "available",
            Property::Registered => "registered",
            Property::CreatedOn => "created_on",
            Property::UpdatedOn => "updated_on",
            Property::ExpiresOn => "expires_on",
            Property::RegistrantContacts => "registrant_contacts",
            Property::AdminContacts => "admin_contacts",
            Property::TechnicalContacts => "technical_contacts",
            Property::Nameservers => "nameservers",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type of value a property carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Bool,
    Text,
    Time,
    Status,
    Contacts,
    Nameservers,
}

impl Kind {
    /// The constant answered by a property the registry never publishes.
    pub fn unsupported_value(self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::Text => Value::Text(None),
            Kind::Time => Value::Time(None),
            Kind::Status => Value::Status(None),
            Kind::Contacts => Value::Contacts(Vec::new()),
            Kind::Nameservers => Value::Nameservers(Vec::new()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "boolean",
            Kind::Text => "text",
            Kind::Time => "timestamp",
            Kind::Status => "status",
            Kind::Contacts => "contact list",
            Kind::Nameservers => "nameserver list",
        };
        f.write_str(name)
    }
}

/// A computed property value.
///
/// Absence is part of the value (`Text(None)`, `Time(None)`, empty lists): a
/// field missing from one response is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Text(Option<String>),
    Time(Option<DateTime<Utc>>),
    Status(Option<DomainStatus>),
    Contacts(Vec<Contact>),
    Nameservers(Vec<Nameserver>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Text(_) => Kind::Text,
            Value::Time(_) => Kind::Time,
            Value::Status(_) => Kind::Status,
            Value::Contacts(_) => Kind::Contacts,
            Value::Nameservers(_) => Kind::Nameservers,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        Value::Text(value)
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        Value::Time(value)
    }
}

impl From<Option<DomainStatus>> for Value {
    fn from(value: Option<DomainStatus>) -> Self {
        Value::Status(value)
    }
}

impl From<Vec<Contact>> for Value {
    fn from(value: Vec<Contact>) -> Self {
        Value::Contacts(value)
    }
}

impl From<Vec<Nameserver>> for Value {
    fn from(value: Vec<Nameserver>) -> Self {
        Value::Nameservers(value)
    }
}

/// How a parser answers a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// A rule extracts the value from the response.
    Supported,
    /// The registry's format never carries this datum.
    NotSupported,
    /// The parser has no rule for this property.
    NotImplemented,
}
