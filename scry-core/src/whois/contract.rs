//! Per-registry property declarations.
//!
//! Every registry format declares, once per parser, which properties it can
//! extract (a rule), which its published format never carries (not
//! supported), and leaves everything else undeclared (not implemented).

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use super::content::InputEncoding;
use super::parser::Parser;
use super::property::{Property, Support, Value};
use super::types::DomainStatus;
use crate::error::Result;

/// Extraction rule for a supported property.
///
/// Rules read the response through the parser and may query other
/// properties, which are memoized the same way.
pub type Rule = fn(&Parser) -> Result<Value>;

/// How a single property is answered.
#[derive(Clone, Copy)]
pub enum Declaration {
    Supported(Rule),
    NotSupported,
}

impl Declaration {
    pub fn support(&self) -> Support {
        match self {
            Declaration::Supported(_) => Support::Supported,
            Declaration::NotSupported => Support::NotSupported,
        }
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Supported(_) => f.write_str("Supported(..)"),
            Declaration::NotSupported => f.write_str("NotSupported"),
        }
    }
}

/// The set of declarations of one registry format.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    entries: HashMap<Property, Declaration>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `property` to an extraction rule.
    pub fn supported(&mut self, property: Property, rule: Rule) -> &mut Self {
        self.declare(property, Declaration::Supported(rule))
    }

    /// Marks `property` as never carried by the registry's format.
    pub fn not_supported(&mut self, property: Property) -> &mut Self {
        self.declare(property, Declaration::NotSupported)
    }

    /// Declares `property`. A later declaration of the same property
    /// replaces the earlier one.
    pub fn declare(&mut self, property: Property, declaration: Declaration) -> &mut Self {
        if let Some(previous) = self.entries.insert(property, declaration) {
            warn!(
                %property,
                ?previous,
                replacement = ?declaration,
                "Property declared twice, keeping the last declaration"
            );
        }
        self
    }

    /// The explicit declaration for `property`, if any.
    pub fn get(&self, property: Property) -> Option<Declaration> {
        self.entries.get(&property).copied()
    }

    /// The declaration used to answer `property`, falling back to the
    /// derived defaults for `Registered` and `Status`.
    pub fn resolve(&self, property: Property) -> Option<Declaration> {
        self.get(property).or_else(|| match property {
            Property::Registered => Some(Declaration::Supported(registered_from_available)),
            Property::Status => Some(Declaration::Supported(status_from_available)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A registry's response format.
///
/// One implementation exists per WHOIS host. Implementations are stateless;
/// the response text and the memoized values live in [`Parser`].
pub trait RegistryFormat: Send + Sync {
    /// The WHOIS host whose responses this format reads.
    fn host(&self) -> &'static str;

    /// Character set the registry publishes its responses in.
    fn encoding(&self) -> InputEncoding {
        InputEncoding::Utf8
    }

    /// Registers the format's property rules.
    fn declare(&self, declarations: &mut Declarations);

    fn declarations(&self) -> Declarations {
        let mut declarations = Declarations::new();
        self.declare(&mut declarations);
        declarations
    }
}

fn registered_from_available(parser: &Parser) -> Result<Value> {
    Ok(Value::Bool(!parser.available()?))
}

fn status_from_available(parser: &Parser) -> Result<Value> {
    let status = if parser.available()? {
        DomainStatus::Available
    } else {
        DomainStatus::Registered
    };
    Ok(Value::Status(Some(status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_true(_: &Parser) -> Result<Value> {
        Ok(Value::Bool(true))
    }

    fn always_false(_: &Parser) -> Result<Value> {
        Ok(Value::Bool(false))
    }

    #[test]
    fn test_undeclared_property_has_no_declaration() {
        let declarations = Declarations::new();
        assert!(declarations.get(Property::CreatedOn).is_none());
        assert!(declarations.resolve(Property::CreatedOn).is_none());
    }

    #[test]
    fn test_registered_and_status_have_defaults() {
        let declarations = Declarations::new();
        assert!(declarations.get(Property::Registered).is_none());
        assert!(matches!(
            declarations.resolve(Property::Registered),
            Some(Declaration::Supported(_))
        ));
        assert!(matches!(
            declarations.resolve(Property::Status),
            Some(Declaration::Supported(_))
        ));
    }

    #[test]
    fn test_explicit_declaration_overrides_default() {
        let mut declarations = Declarations::new();
        declarations.not_supported(Property::Registered);
        assert!(matches!(
            declarations.resolve(Property::Registered),
            Some(Declaration::NotSupported)
        ));
    }

    #[test]
    fn test_redeclaration_replaces() {
        let mut declarations = Declarations::new();
        declarations
            .supported(Property::Available, always_true)
            .supported(Property::Available, always_false);
        assert_eq!(declarations.len(), 1);

        declarations.not_supported(Property::Available);
        assert_eq!(
            declarations.get(Property::Available).map(|d| d.support()),
            Some(Support::NotSupported)
        );
    }
}
