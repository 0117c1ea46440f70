//! Configuration Tree Tests
//!
//! These tests verify:
//! - Canonical encoding (element order, omitted empty leaves, escaping)
//! - Edit operation attributes on the node they belong to
//! - Shallow delete preparation
//! - Serde input format used by the CLI

use netconf_rpc::tree::encode_configuration;
use netconf_rpc::{
    Address, AddressBook, AddressSet, Configuration, EditOperation, NetconfError,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn wrap(book: &str) -> String {
    format!("<configuration><security>{}</security></configuration>", book)
}

fn nested_book() -> AddressBook {
    AddressBook::new("global")
        .with_address(Address::new("a1", "10.0.0.1/32"))
        .with_address_set(
            AddressSet::new("outer")
                .with_address(Address::new("a2", "10.0.0.2/32"))
                .with_address_set(AddressSet::new("inner").with_address(Address::new("a3", "10.0.0.3/32"))),
        )
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_empty_configuration() {
    let encoded = encode_configuration(&Configuration::default()).unwrap();
    assert_eq!(encoded, wrap("<address-book></address-book>"));
}

#[test]
fn test_encode_omits_empty_leaves() {
    let config = Configuration::new(AddressBook::new("global").with_address(Address::new("a1", "")));
    assert_eq!(
        encode_configuration(&config).unwrap(),
        wrap("<address-book><name>global</name><address><name>a1</name></address></address-book>")
    );
}

#[test]
fn test_encode_full_address_set() {
    let config = Configuration::new(
        AddressBook::new("global").with_address_set(
            AddressSet::new("web")
                .with_reference("shared")
                .with_description("web tier")
                .with_address(Address::new("w1", "10.1.0.1/32").with_description("first")),
        ),
    );
    assert_eq!(
        encode_configuration(&config).unwrap(),
        wrap(
            "<address-book><name>global</name>\
             <address-set><name>web</name><address-set-name>shared</address-set-name>\
             <description>web tier</description>\
             <address><name>w1</name><description>first</description><ip-prefix>10.1.0.1/32</ip-prefix></address>\
             </address-set></address-book>"
        )
    );
}

#[test]
fn test_encode_preserves_sequence_order() {
    let config = Configuration::new(
        AddressBook::new("b")
            .with_address(Address::new("zeta", "10.0.0.26/32"))
            .with_address(Address::new("alpha", "10.0.0.1/32"))
            .with_address(Address::new("mid", "10.0.0.13/32")),
    );
    let encoded = encode_configuration(&config).unwrap();

    let zeta = encoded.find("zeta").unwrap();
    let alpha = encoded.find("alpha").unwrap();
    let mid = encoded.find("mid").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

#[test]
fn test_encode_is_deterministic() {
    let config = Configuration::new(nested_book());
    let first = encode_configuration(&config).unwrap();
    let second = encode_configuration(&config.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_encode_escapes_markup() {
    let config = Configuration::new(
        AddressBook::new("global")
            .with_address(Address::new("a&b", "10.0.0.1/32").with_description("<tag> \"quoted\"")),
    );
    let encoded = encode_configuration(&config).unwrap();

    assert!(encoded.contains("<name>a&amp;b</name>"));
    assert!(encoded.contains("<description>&lt;tag&gt; &quot;quoted&quot;</description>"));
}

#[test]
fn test_encode_keeps_whitespace_inside_values() {
    let config = Configuration::new(
        AddressBook::new("global")
            .with_address(Address::new("a1", "10.0.0.1/32").with_description("two\tcolumns\nand lines")),
    );
    let encoded = encode_configuration(&config).unwrap();
    assert!(encoded.contains("<description>two\tcolumns\nand lines</description>"));
}

#[test]
fn test_encode_has_no_structural_whitespace() {
    let encoded = encode_configuration(&Configuration::new(nested_book())).unwrap();
    assert!(!encoded.contains('\n'));
    assert!(!encoded.contains('\t'));
    assert!(!encoded.contains("> <"));
}

#[test]
fn test_encode_rejects_control_characters() {
    let config = Configuration::new(
        AddressBook::new("global")
            .with_address(Address::new("a1", "10.0.0.1/32").with_description("bell\u{7}")),
    );
    match encode_configuration(&config) {
        Err(NetconfError::Encode(msg)) => {
            assert!(msg.contains("description"));
            assert!(msg.contains("U+0007"));
        }
        other => panic!("Expected encode error, got {:?}", other),
    }
}

// =============================================================================
// Edit Operation Tests
// =============================================================================

#[test]
fn test_operation_attribute_only_on_its_node() {
    let config = Configuration::new(
        AddressBook::new("global").with_address_set(
            AddressSet::new("s")
                .with_operation(EditOperation::Replace)
                .with_address(Address::new("a", "10.0.0.1/32")),
        ),
    );
    let encoded = encode_configuration(&config).unwrap();

    assert!(encoded.contains("<address-set operation=\"replace\"><name>s</name>"));
    assert!(encoded.contains("<address><name>a</name>"));
    assert_eq!(encoded.matches("operation=").count(), 1);
}

#[test]
fn test_operation_names() {
    assert_eq!(EditOperation::Delete.as_str(), "delete");
    assert_eq!(EditOperation::Replace.as_str(), "replace");
    assert_eq!(EditOperation::Create.as_str(), "create");
    assert_eq!(EditOperation::parse("create"), Some(EditOperation::Create));
    assert_eq!(EditOperation::parse("merge"), None);
}

// =============================================================================
// Delete Preparation Tests
// =============================================================================

#[test]
fn test_prepare_delete_is_shallow() {
    let mut book = nested_book();
    book.prepare_delete();

    assert_eq!(book.addresses[0].operation, Some(EditOperation::Delete));

    let outer = &book.address_sets[0];
    assert_eq!(outer.operation, Some(EditOperation::Delete));

    // Children of the stamped set are left alone
    assert_eq!(outer.addresses[0].operation, None);
    let inner = &outer.address_sets[0];
    assert_eq!(inner.operation, None);
    assert_eq!(inner.addresses[0].operation, None);
}

#[test]
fn test_prepare_delete_overrides_existing_directive() {
    let mut book = AddressBook::new("global")
        .with_address(Address::new("a", "10.0.0.1/32").with_operation(EditOperation::Create));
    book.prepare_delete();
    assert_eq!(book.addresses[0].operation, Some(EditOperation::Delete));
}

#[test]
fn test_for_delete_copies() {
    let config = Configuration::new(nested_book());
    let prepared = config.for_delete();

    assert_eq!(config.address_book.address_sets[0].operation, None);
    assert_eq!(prepared.address_book.address_sets[0].operation, Some(EditOperation::Delete));
}

// =============================================================================
// Serde Input Tests
// =============================================================================

#[test]
fn test_configuration_from_json() {
    let json = r#"{
        "address-book": {
            "name": "global",
            "addresses": [{ "name": "a1", "ip-prefix": "10.0.0.1/32" }],
            "address-sets": [{ "name": "s1", "operation": "replace" }]
        }
    }"#;
    let config: Configuration = serde_json::from_str(json).unwrap();

    assert_eq!(config.address_book.name, "global");
    assert_eq!(config.address_book.addresses[0], Address::new("a1", "10.0.0.1/32"));
    assert_eq!(
        config.address_book.address_sets[0].operation,
        Some(EditOperation::Replace)
    );
}
