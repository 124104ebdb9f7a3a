pub mod error;
pub mod options;
pub mod whois;

pub use error::{Result, ScryError};
pub use options::ParseOptions;

pub use whois::{
    Contact, ContactRole, Declarations, DomainStatus, InputEncoding, Nameserver, Parser,
    ParserRegistry, Property, RegistryFormat, Support, Value, PARSER_REGISTRY,
};
