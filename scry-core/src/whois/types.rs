//! Structured records produced by registry parsers.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

/// The role a contact plays for a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactRole {
    Registrant,
    Admin,
    Technical,
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactRole::Registrant => write!(f, "registrant"),
            ContactRole::Admin => write!(f, "admin"),
            ContactRole::Technical => write!(f, "technical"),
        }
    }
}

/// A person or organization listed in a registry response.
///
/// The role is fixed when the contact is created; the remaining fields are
/// filled through the `with_*` builders while the contact is being extracted
/// and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    role: ContactRole,
    name: Option<String>,
    organization: Option<String>,
    address: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    country: Option<String>,
}

impl Contact {
    pub fn new(role: ContactRole) -> Self {
        Self {
            role,
            name: None,
            organization: None,
            address: None,
            city: None,
            zip: None,
            country: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = non_empty(organization);
        self
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = non_empty(address);
        self
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = non_empty(city);
        self
    }

    pub fn with_zip(mut self, zip: Option<String>) -> Self {
        self.zip = non_empty(zip);
        self
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = non_empty(country);
        self
    }

    pub fn role(&self) -> ContactRole {
        self.role
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Returns true if no field besides the role was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.organization.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.zip.is_none()
            && self.country.is_none()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.role)?;
        let fields = [
            ("Name", &self.name),
            ("Organization", &self.organization),
            ("Address", &self.address),
            ("City", &self.city),
            ("Postal code", &self.zip),
            ("Country", &self.country),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                write!(f, "\n  {}: {}", label, value)?;
            }
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A nameserver with the addresses the registry published for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameserver {
    pub name: String,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl Nameserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ipv4: None,
            ipv6: None,
        }
    }

    pub fn has_addresses(&self) -> bool {
        self.ipv4.is_some() || self.ipv6.is_some()
    }
}

impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ipv4) = self.ipv4 {
            write!(f, " [{}]", ipv4)?;
        }
        if let Some(ipv6) = self.ipv6 {
            write!(f, " [{}]", ipv6)?;
        }
        Ok(())
    }
}

/// Registration state derived from a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Available,
    Registered,
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainStatus::Available => write!(f, "available"),
            DomainStatus::Registered => write!(f, "registered"),
        }
    }
}
