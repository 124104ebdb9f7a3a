use crate::whois::types::{Contact, ContactRole};

/// Field positions of a fixed-arity contact block, counted from its end.
///
/// Registries that print contacts as bare lines (no `key: value` labels)
/// use a fixed record whose leading organization line may be missing, so
/// fields are located from the last line backwards:
///
/// ```text
/// [organization]     trailing + 5 from the end, optional
/// name               trailing + 4
/// address            trailing + 3
/// postal code        trailing + 2
/// country            trailing + 1
/// <trailing lines>   ignored
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactLayout {
    /// Lines after the country that carry no contact data.
    pub trailing: usize,
}

impl ContactLayout {
    pub const fn new(trailing: usize) -> Self {
        Self { trailing }
    }

    /// The line `offset` positions before the end of the record.
    fn from_end<'a>(&self, lines: &[&'a str], offset: usize) -> Option<&'a str> {
        let index = lines.len().checked_sub(self.trailing + offset)?;
        lines.get(index).copied()
    }
}

/// Builds a contact from the lines of a block using `layout`.
///
/// Returns `None` when the block has no line left for any field.
pub fn contact_from_block(lines: &[&str], role: ContactRole, layout: ContactLayout) -> Option<Contact> {
    let field = |offset| layout.from_end(lines, offset).map(str::to_string);

    let contact = Contact::new(role)
        .with_organization(field(5))
        .with_name(field(4))
        .with_address(field(3))
        .with_zip(field(2))
        .with_country(field(1));

    if contact.is_empty() {
        None
    } else {
        Some(contact)
    }
}
