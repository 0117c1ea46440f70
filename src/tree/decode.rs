//! Configuration tree decoder
//!
//! Rebuilds the tree from a `<configuration>` element embedded in a reply.
//! Elements outside the address-book schema are skipped.

use crate::error::Result;
use crate::xml::{Element, XmlCursor};
use super::{Address, AddressBook, AddressSet, Configuration, EditOperation};

/// Decode the body of a `<configuration>` element whose start tag was just read
pub(crate) fn decode_configuration(
    cur: &mut XmlCursor<'_>,
    element: &Element<'_>,
) -> Result<Configuration> {
    let mut config = Configuration::default();
    if element.is_empty() {
        return Ok(config);
    }
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"security" => decode_security(cur, &child, &mut config)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(config)
}

fn decode_security(
    cur: &mut XmlCursor<'_>,
    element: &Element<'_>,
    config: &mut Configuration,
) -> Result<()> {
    if element.is_empty() {
        return Ok(());
    }
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"address-book" => config.address_book = decode_address_book(cur, &child)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(())
}

fn decode_address_book(cur: &mut XmlCursor<'_>, element: &Element<'_>) -> Result<AddressBook> {
    let mut book = AddressBook::default();
    if element.is_empty() {
        return Ok(book);
    }
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"name" => book.name = cur.text(&child)?,
            b"address" => book.addresses.push(decode_address(cur, &child)?),
            b"address-set" => book.address_sets.push(decode_address_set(cur, &child)?),
            _ => cur.skip(&child)?,
        }
    }
    Ok(book)
}

fn decode_address(cur: &mut XmlCursor<'_>, element: &Element<'_>) -> Result<Address> {
    let mut address = Address {
        operation: decode_operation(element)?,
        ..Address::default()
    };
    if element.is_empty() {
        return Ok(address);
    }
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"name" => address.name = cur.text(&child)?,
            b"description" => address.description = cur.text(&child)?,
            b"ip-prefix" => address.ip_prefix = cur.text(&child)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(address)
}

fn decode_address_set(cur: &mut XmlCursor<'_>, element: &Element<'_>) -> Result<AddressSet> {
    let mut set = AddressSet {
        operation: decode_operation(element)?,
        ..AddressSet::default()
    };
    if element.is_empty() {
        return Ok(set);
    }
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"name" => set.name = cur.text(&child)?,
            b"address-set-name" => set.address_set_name = cur.text(&child)?,
            b"description" => set.description = cur.text(&child)?,
            b"address" => set.addresses.push(decode_address(cur, &child)?),
            b"address-set" => set.address_sets.push(decode_address_set(cur, &child)?),
            _ => cur.skip(&child)?,
        }
    }
    Ok(set)
}

fn decode_operation(element: &Element<'_>) -> Result<Option<EditOperation>> {
    let Some(value) = element.attribute(b"operation")? else {
        return Ok(None);
    };
    let operation = EditOperation::parse(&value);
    if operation.is_none() {
        tracing::warn!("Ignoring unknown edit operation '{}'", value);
    }
    Ok(operation)
}
