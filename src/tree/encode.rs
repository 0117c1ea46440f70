//! Configuration tree encoder
//!
//! Writes the tree straight into canonical form: no indentation or
//! line breaks are introduced between elements, so nothing has to be
//! stripped afterwards and whitespace inside leaf values survives intact.

use quick_xml::escape::escape;

use crate::error::{NetconfError, Result};
use super::{Address, AddressBook, AddressSet, Configuration, EditOperation};

/// Encode a configuration document to its canonical XML string
///
/// Deterministic: the same tree always yields the same bytes, and
/// sequences keep the order the caller gave them.
pub fn encode_configuration(config: &Configuration) -> Result<String> {
    let mut out = XmlOut::default();
    out.open("configuration", None);
    out.open("security", None);
    encode_address_book(&mut out, &config.address_book)?;
    out.close("security");
    out.close("configuration");
    Ok(out.finish())
}

// =============================================================================
// Node Encoders
// =============================================================================

fn encode_address_book(out: &mut XmlOut, book: &AddressBook) -> Result<()> {
    out.open("address-book", None);
    out.leaf("name", &book.name)?;
    for address in &book.addresses {
        encode_address(out, address)?;
    }
    for set in &book.address_sets {
        encode_address_set(out, set)?;
    }
    out.close("address-book");
    Ok(())
}

fn encode_address(out: &mut XmlOut, address: &Address) -> Result<()> {
    out.open("address", address.operation);
    out.leaf("name", &address.name)?;
    out.leaf("description", &address.description)?;
    out.leaf("ip-prefix", &address.ip_prefix)?;
    out.close("address");
    Ok(())
}

fn encode_address_set(out: &mut XmlOut, set: &AddressSet) -> Result<()> {
    out.open("address-set", set.operation);
    out.leaf("name", &set.name)?;
    out.leaf("address-set-name", &set.address_set_name)?;
    out.leaf("description", &set.description)?;
    for address in &set.addresses {
        encode_address(out, address)?;
    }
    for nested in &set.address_sets {
        encode_address_set(out, nested)?;
    }
    out.close("address-set");
    Ok(())
}

// =============================================================================
// Output Buffer
// =============================================================================

#[derive(Default)]
struct XmlOut {
    buf: String,
}

impl XmlOut {
    fn open(&mut self, name: &str, operation: Option<EditOperation>) {
        self.buf.push('<');
        self.buf.push_str(name);
        if let Some(op) = operation {
            self.buf.push_str(" operation=\"");
            self.buf.push_str(op.as_str());
            self.buf.push('"');
        }
        self.buf.push('>');
    }

    fn close(&mut self, name: &str) {
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
    }

    /// Write `<name>value</name>`, or nothing when the value is empty
    fn leaf(&mut self, name: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        check_xml_text(name, value)?;
        self.open(name, None);
        self.buf.push_str(&escape(value));
        self.close(name);
        Ok(())
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Reject characters XML 1.0 cannot carry, even escaped
fn check_xml_text(field: &str, value: &str) -> Result<()> {
    let bad = value.chars().find(|&c| {
        matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
    });
    match bad {
        Some(c) => Err(NetconfError::Encode(format!(
            "{}: character U+{:04X} is not allowed in XML",
            field, c as u32
        ))),
        None => Ok(()),
    }
}
