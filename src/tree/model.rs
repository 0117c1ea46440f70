//! Configuration tree definitions
//!
//! Owned recursive tree: an address-set holds its nested sets by value.

use serde::{Deserialize, Serialize};

/// Per-node edit directive
///
/// Absence means the device merges the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditOperation {
    Delete,
    Replace,
    Create,
}

impl EditOperation {
    /// Attribute value as written on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Delete => "delete",
            EditOperation::Replace => "replace",
            EditOperation::Create => "create",
        }
    }

    /// Parse an attribute value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "delete" => Some(EditOperation::Delete),
            "replace" => Some(EditOperation::Replace),
            "create" => Some(EditOperation::Create),
            _ => None,
        }
    }
}

/// A single named address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<EditOperation>,
    pub name: String,
    pub description: String,
    /// Prefix literal, passed through unvalidated
    pub ip_prefix: String,
}

impl Address {
    pub fn new(name: impl Into<String>, ip_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_prefix: ip_prefix.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_operation(mut self, operation: EditOperation) -> Self {
        self.operation = Some(operation);
        self
    }
}

/// A named group of addresses and nested groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AddressSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<EditOperation>,
    pub name: String,
    /// Reference to another address-set by name
    pub address_set_name: String,
    pub description: String,
    pub addresses: Vec<Address>,
    pub address_sets: Vec<AddressSet>,
}

impl AddressSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_reference(mut self, address_set_name: impl Into<String>) -> Self {
        self.address_set_name = address_set_name.into();
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    pub fn with_address_set(mut self, set: AddressSet) -> Self {
        self.address_sets.push(set);
        self
    }

    pub fn with_operation(mut self, operation: EditOperation) -> Self {
        self.operation = Some(operation);
        self
    }
}

/// Root of one address-book subtree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AddressBook {
    pub name: String,
    pub addresses: Vec<Address>,
    pub address_sets: Vec<AddressSet>,
}

impl AddressBook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    pub fn with_address_set(mut self, set: AddressSet) -> Self {
        self.address_sets.push(set);
        self
    }

    /// Stamp `delete` on every direct child address and address-set.
    ///
    /// One level only: children of those address-sets keep their own
    /// directive.
    pub fn prepare_delete(&mut self) {
        for address in &mut self.addresses {
            address.operation = Some(EditOperation::Delete);
        }
        for set in &mut self.address_sets {
            set.operation = Some(EditOperation::Delete);
        }
    }
}

/// An address-book under the fixed `security` context
///
/// The document handed to get-config filters and edit-config payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    pub address_book: AddressBook,
}

impl Configuration {
    pub fn new(address_book: AddressBook) -> Self {
        Self { address_book }
    }

    /// Copy of this document with delete stamped on the book's direct children
    pub fn for_delete(&self) -> Self {
        let mut prepared = self.clone();
        prepared.address_book.prepare_delete();
        prepared
    }
}
