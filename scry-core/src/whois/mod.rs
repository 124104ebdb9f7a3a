mod content;
mod contract;
pub mod extract;
mod parser;
pub mod parsers;
mod property;
mod types;

pub use content::{Content, InputEncoding};
pub use contract::{Declaration, Declarations, RegistryFormat, Rule};
pub use parser::Parser;
pub use parsers::{ParserRegistry, PARSER_REGISTRY};
pub use property::{Kind, Property, Support, Value};
pub use types::{Contact, ContactRole, DomainStatus, Nameserver};
