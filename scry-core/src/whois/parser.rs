use chrono::{DateTime, Utc};
use once_cell::unsync::OnceCell;
use tracing::{debug, trace};

use super::content::Content;
use super::contract::{Declaration, Declarations, RegistryFormat};
use super::property::{Kind, Property, Support, Value};
use super::types::{Contact, ContactRole, DomainStatus, Nameserver};
use crate::error::{Result, ScryError};
use crate::options::ParseOptions;

/// A registry response bound to its format's declarations.
///
/// Each property is computed at most once: the first access runs the rule
/// and stores the result, later accesses return the stored value. A parser
/// serves exactly one response and is not `Sync`; callers sharing one across
/// threads must wrap it in a lock.
pub struct Parser {
    host: String,
    content: Content,
    declarations: Declarations,
    values: [OnceCell<Value>; Property::COUNT],
}

impl Parser {
    /// Builds a parser for already decoded text.
    pub fn new(format: &dyn RegistryFormat, text: &str) -> Self {
        Self::with_content(format, Content::new(text))
    }

    /// Builds a parser for raw response bytes, decoding them once with the
    /// registry's declared encoding (or the override in `options`).
    pub fn from_bytes(
        format: &dyn RegistryFormat,
        bytes: &[u8],
        options: &ParseOptions,
    ) -> Result<Self> {
        options.check_size(bytes.len())?;
        let encoding = options.encoding_for(format.encoding());
        Ok(Self::with_content(format, Content::decode(bytes, encoding)))
    }

    pub fn with_content(format: &dyn RegistryFormat, content: Content) -> Self {
        Self {
            host: format.host().to_string(),
            content,
            declarations: format.declarations(),
            values: Default::default(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Shorthand for the scanner view of the response.
    pub fn text(&self) -> &str {
        self.content.for_scanner()
    }

    /// How this parser answers `property`.
    pub fn support(&self, property: Property) -> Support {
        self.declarations
            .resolve(property)
            .map_or(Support::NotImplemented, |d| d.support())
    }

    pub fn is_supported(&self, property: Property) -> bool {
        self.support(property) == Support::Supported
    }

    /// Returns the value of `property`, computing it on first access.
    ///
    /// Not-supported properties answer their kind's constant without running
    /// any extraction. Undeclared properties fail with
    /// [`ScryError::PropertyNotImplemented`].
    pub fn property(&self, property: Property) -> Result<&Value> {
        let slot = &self.values[property.index()];
        if let Some(value) = slot.get() {
            trace!(host = %self.host, %property, "Property served from cache");
            return Ok(value);
        }
        slot.get_or_try_init(|| self.compute(property))
    }

    fn compute(&self, property: Property) -> Result<Value> {
        match self.declarations.resolve(property) {
            None => {
                debug!(host = %self.host, %property, "Property not implemented");
                Err(ScryError::PropertyNotImplemented {
                    property,
                    host: self.host.clone(),
                })
            }
            Some(Declaration::NotSupported) => Ok(property.kind().unsupported_value()),
            Some(Declaration::Supported(rule)) => {
                trace!(host = %self.host, %property, "Computing property");
                let value = rule(self)?;
                if value.kind() != property.kind() {
                    return Err(self.mismatch(property, value.kind()));
                }
                Ok(value)
            }
        }
    }

    fn mismatch(&self, property: Property, found: Kind) -> ScryError {
        ScryError::PropertyTypeMismatch {
            property,
            host: self.host.clone(),
            expected: property.kind(),
            found,
        }
    }

    fn bool_property(&self, property: Property) -> Result<bool> {
        match self.property(property)? {
            Value::Bool(value) => Ok(*value),
            other => Err(self.mismatch(property, other.kind())),
        }
    }

    fn text_property(&self, property: Property) -> Result<Option<&str>> {
        match self.property(property)? {
            Value::Text(value) => Ok(value.as_deref()),
            other => Err(self.mismatch(property, other.kind())),
        }
    }

    fn time_property(&self, property: Property) -> Result<Option<DateTime<Utc>>> {
        match self.property(property)? {
            Value::Time(value) => Ok(*value),
            other => Err(self.mismatch(property, other.kind())),
        }
    }

    pub fn disclaimer(&self) -> Result<Option<&str>> {
        self.text_property(Property::Disclaimer)
    }

    pub fn domain(&self) -> Result<Option<&str>> {
        self.text_property(Property::Domain)
    }

    pub fn domain_id(&self) -> Result<Option<&str>> {
        self.text_property(Property::DomainId)
    }

    pub fn registrar(&self) -> Result<Option<&str>> {
        self.text_property(Property::Registrar)
    }

    pub fn status(&self) -> Result<Option<DomainStatus>> {
        match self.property(Property::Status)? {
            Value::Status(value) => Ok(*value),
            other => Err(self.mismatch(Property::Status, other.kind())),
        }
    }

    pub fn available(&self) -> Result<bool> {
        self.bool_property(Property::Available)
    }

    /// Defaults to the negation of [`Parser::available`] unless the format
    /// declares it.
    pub fn registered(&self) -> Result<bool> {
        self.bool_property(Property::Registered)
    }

    pub fn created_on(&self) -> Result<Option<DateTime<Utc>>> {
        self.time_property(Property::CreatedOn)
    }

    pub fn updated_on(&self) -> Result<Option<DateTime<Utc>>> {
        self.time_property(Property::UpdatedOn)
    }

    pub fn expires_on(&self) -> Result<Option<DateTime<Utc>>> {
        self.time_property(Property::ExpiresOn)
    }

    /// Contacts listed for `role`.
    pub fn contacts(&self, role: ContactRole) -> Result<&[Contact]> {
        let property = Property::for_role(role);
        match self.property(property)? {
            Value::Contacts(contacts) => Ok(contacts),
            other => Err(self.mismatch(property, other.kind())),
        }
    }

    pub fn registrant_contacts(&self) -> Result<&[Contact]> {
        self.contacts(ContactRole::Registrant)
    }

    pub fn admin_contacts(&self) -> Result<&[Contact]> {
        self.contacts(ContactRole::Admin)
    }

    pub fn technical_contacts(&self) -> Result<&[Contact]> {
        self.contacts(ContactRole::Technical)
    }

    /// Nameservers in the order the registry lists them.
    pub fn nameservers(&self) -> Result<&[Nameserver]> {
        match self.property(Property::Nameservers)? {
            Value::Nameservers(nameservers) => Ok(nameservers),
            other => Err(self.mismatch(Property::Nameservers, other.kind())),
        }
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("host", &self.host)
            .field("declarations", &self.declarations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whois::InputEncoding;

    struct Sample;

    fn available(parser: &Parser) -> Result<Value> {
        Ok(Value::Bool(parser.text().contains("No match")))
    }

    fn wrong_kind(_: &Parser) -> Result<Value> {
        Ok(Value::Bool(true))
    }

    impl RegistryFormat for Sample {
        fn host(&self) -> &'static str {
            "whois.sample.test"
        }

        fn encoding(&self) -> InputEncoding {
            InputEncoding::Latin1
        }

        fn declare(&self, declarations: &mut Declarations) {
            declarations
                .supported(Property::Available, available)
                .supported(Property::Domain, wrong_kind)
                .not_supported(Property::ExpiresOn)
                .not_supported(Property::AdminContacts);
        }
    }

    #[test]
    fn test_support_levels() {
        let parser = Parser::new(&Sample, "No match");
        assert_eq!(parser.support(Property::Available), Support::Supported);
        assert_eq!(parser.support(Property::Registered), Support::Supported);
        assert_eq!(parser.support(Property::ExpiresOn), Support::NotSupported);
        assert_eq!(parser.support(Property::CreatedOn), Support::NotImplemented);
        assert!(!parser.is_supported(Property::AdminContacts));
    }

    #[test]
    fn test_derived_registered_and_status() {
        let parser = Parser::new(&Sample, "No match");
        assert!(parser.available().unwrap());
        assert!(!parser.registered().unwrap());
        assert_eq!(parser.status().unwrap(), Some(DomainStatus::Available));

        let parser = Parser::new(&Sample, "Domain: example.test");
        assert!(!parser.available().unwrap());
        assert!(parser.registered().unwrap());
        assert_eq!(parser.status().unwrap(), Some(DomainStatus::Registered));
    }

    #[test]
    fn test_not_supported_constants() {
        let parser = Parser::new(&Sample, "Expires: 2030-01-01");
        assert_eq!(parser.expires_on().unwrap(), None);
        assert!(parser.admin_contacts().unwrap().is_empty());
    }

    #[test]
    fn test_not_implemented() {
        let parser = Parser::new(&Sample, "");
        let err = parser.created_on().unwrap_err();
        assert!(err.is_not_implemented());
        assert_eq!(
            err,
            ScryError::PropertyNotImplemented {
                property: Property::CreatedOn,
                host: "whois.sample.test".to_string(),
            }
        );
    }

    #[test]
    fn test_kind_mismatch_is_reported() {
        let parser = Parser::new(&Sample, "");
        let err = parser.domain().unwrap_err();
        assert!(matches!(
            err,
            ScryError::PropertyTypeMismatch {
                property: Property::Domain,
                expected: Kind::Text,
                found: Kind::Bool,
                ..
            }
        ));
    }

    #[test]
    fn test_from_bytes_uses_declared_encoding() {
        let parser = Parser::from_bytes(&Sample, b"M\xfcller", &ParseOptions::default()).unwrap();
        assert_eq!(parser.content().raw(), "Müller");

        let options = ParseOptions::new().with_encoding(InputEncoding::Utf8);
        let parser = Parser::from_bytes(&Sample, "Müller".as_bytes(), &options).unwrap();
        assert_eq!(parser.content().raw(), "Müller");
    }

    #[test]
    fn test_from_bytes_rejects_oversized_content() {
        let options = ParseOptions::new().with_max_content_size(2);
        let err = Parser::from_bytes(&Sample, b"abc", &options).unwrap_err();
        assert_eq!(err, ScryError::ContentTooLarge { size: 3, limit: 2 });
    }
}
