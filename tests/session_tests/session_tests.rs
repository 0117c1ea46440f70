//! Session Tests
//!
//! These tests verify:
//! - Envelope assembly with injected message ids
//! - Reply classification under the session policy
//! - Error propagation for generation, encoding, transport and decoding
//! - Sharing one session between threads

use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use netconf_rpc::rpc::{MessageIdGenerator, SequentialIdGenerator};
use netconf_rpc::transport::{FramedTransport, Transport};
use netconf_rpc::{
    Address, AddressBook, Config, Configuration, Method, NetconfError, Result, Session,
};

// =============================================================================
// Helper Types
// =============================================================================

/// Transport that records requests and plays back canned replies
#[derive(Default)]
struct ScriptedTransport {
    requests: Vec<String>,
    replies: VecDeque<Result<Bytes>>,
}

impl ScriptedTransport {
    fn replying(replies: &[&str]) -> Self {
        Self {
            requests: Vec::new(),
            replies: replies
                .iter()
                .map(|r| Ok(Bytes::copy_from_slice(r.as_bytes())))
                .collect(),
        }
    }
}

impl Transport for ScriptedTransport {
    fn round_trip(&mut self, request: &[u8]) -> Result<Bytes> {
        self.requests.push(String::from_utf8_lossy(request).into_owned());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(NetconfError::Transport("no reply scripted".to_string())))
    }
}

struct FailingGenerator;

impl MessageIdGenerator for FailingGenerator {
    fn next_id(&self) -> Result<String> {
        Err(NetconfError::Generation("random source failed".to_string()))
    }
}

const OK_REPLY: &str = "<rpc-reply><ok/></rpc-reply>";
const WARNING_REPLY: &str = "<rpc-reply><rpc-error><error-severity>warning</error-severity>\
                             <error-message>uncommitted changes</error-message></rpc-error><ok/></rpc-reply>";
const ERROR_REPLY: &str = "<rpc-reply><rpc-error><error-severity>error</error-severity>\
                           <error-message>lock denied</error-message></rpc-error></rpc-reply>";

fn session(transport: ScriptedTransport, config: Config) -> Session<ScriptedTransport> {
    Session::with_id_generator(transport, config, Arc::new(SequentialIdGenerator::new("s"))).unwrap()
}

// =============================================================================
// Request Tests
// =============================================================================

#[test]
fn test_exec_sends_envelope() {
    let session = session(ScriptedTransport::replying(&[OK_REPLY]), Config::default());

    let outcome = session.lock("candidate").unwrap();
    assert!(outcome.reply.is_ok());
    assert_eq!(outcome.reply.message_id(), "s-1");

    let transport = session.into_transport();
    assert_eq!(
        transport.requests,
        vec![
            "<rpc message-id=\"s-1\" xmlns=\"urn:ietf:params:xml:ns:netconf:base:1.0\">\
             <lock><target><candidate/></target></lock></rpc>"
                .to_string()
        ]
    );
}

#[test]
fn test_each_exec_gets_new_id() {
    let session = session(ScriptedTransport::replying(&[OK_REPLY, OK_REPLY]), Config::default());

    assert_eq!(session.commit().unwrap().reply.message_id(), "s-1");
    assert_eq!(session.discard_changes().unwrap().reply.message_id(), "s-2");
}

#[test]
fn test_batched_exec() {
    let session = session(ScriptedTransport::replying(&[OK_REPLY]), Config::default());
    session
        .exec(vec![Method::lock("candidate"), Method::commit(), Method::unlock("candidate")])
        .unwrap();

    let request = &session.into_transport().requests[0];
    let lock = request.find("<lock>").unwrap();
    let commit = request.find("<commit/>").unwrap();
    let unlock = request.find("<unlock>").unwrap();
    assert!(lock < commit && commit < unlock);
}

#[test]
fn test_delete_config_request() {
    let session = session(ScriptedTransport::replying(&[OK_REPLY]), Config::default());
    let config = Configuration::new(
        AddressBook::new("global").with_address(Address::new("a1", "10.0.0.1/32")),
    );
    session.delete_config(config).unwrap();

    let request = &session.into_transport().requests[0];
    assert!(request.contains("<address operation=\"delete\"><name>a1</name>"));
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_warning_tolerated_by_default() {
    let session = session(ScriptedTransport::replying(&[WARNING_REPLY]), Config::default());
    let outcome = session.commit().unwrap();

    assert!(outcome.failure.is_none());
    assert_eq!(outcome.reply.errors().len(), 1);
}

#[test]
fn test_warning_fails_with_policy() {
    let config = Config::builder().error_on_warning(true).build();
    let session = session(ScriptedTransport::replying(&[WARNING_REPLY]), config);
    let outcome = session.commit().unwrap();

    assert_eq!(
        outcome.failure.unwrap().to_string(),
        "netconf rpc [warning] 'uncommitted changes'"
    );
    assert!(outcome.reply.is_ok());
}

#[test]
fn test_error_reply_keeps_reply() {
    let session = session(ScriptedTransport::replying(&[ERROR_REPLY]), Config::default());
    let outcome = session.lock("candidate").unwrap();

    assert!(outcome.is_failure());
    assert!(!outcome.reply.is_ok());
    assert_eq!(outcome.reply.errors()[0].message, "lock denied");
}

// =============================================================================
// Failure Propagation Tests
// =============================================================================

#[test]
fn test_generation_failure_sends_nothing() {
    let session = Session::with_id_generator(
        ScriptedTransport::replying(&[OK_REPLY]),
        Config::default(),
        Arc::new(FailingGenerator),
    )
    .unwrap();

    match session.commit() {
        Err(NetconfError::Generation(_)) => {}
        other => panic!("Expected generation error, got {:?}", other),
    }
    assert!(session.into_transport().requests.is_empty());
}

#[test]
fn test_encode_failure_sends_nothing() {
    let session = session(ScriptedTransport::replying(&[OK_REPLY]), Config::default());
    let config = Configuration::new(AddressBook::new("bad\u{1}"));

    match session.edit_config(config) {
        Err(NetconfError::Encode(_)) => {}
        other => panic!("Expected encode error, got {:?}", other),
    }
    assert!(session.into_transport().requests.is_empty());
}

#[test]
fn test_transport_failure() {
    let session = session(ScriptedTransport::default(), Config::default());
    match session.commit() {
        Err(NetconfError::Transport(msg)) => assert_eq!(msg, "no reply scripted"),
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[test]
fn test_malformed_reply() {
    let session = session(ScriptedTransport::replying(&["<rpc-reply><ok/>"]), Config::default());
    match session.commit() {
        Err(NetconfError::Decode(_)) => {}
        other => panic!("Expected decode error, got {:?}", other),
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config = Config::builder().max_message_size(0).build();
    let result = Session::new(ScriptedTransport::default(), config);
    assert!(matches!(result, Err(NetconfError::Config(_))));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_shared_session_across_threads() {
    let replies = vec![OK_REPLY; 40];
    let session = session(ScriptedTransport::replying(&replies), Config::default());

    crossbeam::scope(|s| {
        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..10 {
                    assert!(session.commit().unwrap().reply.is_ok());
                }
            });
        }
    })
    .unwrap();

    let transport = session.into_transport();
    assert_eq!(transport.requests.len(), 40);

    let mut ids: Vec<&str> = transport
        .requests
        .iter()
        .map(|r| r.split('"').nth(1).unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}

// =============================================================================
// Framed Transport Integration
// =============================================================================

#[test]
fn test_session_over_framed_stream() {
    let input: &[u8] = b"<rpc-reply message-id=\"s-1\"><ok/></rpc-reply>]]>]]>";
    let transport = FramedTransport::new(input, Vec::new());
    let session = Session::with_id_generator(
        transport,
        Config::default(),
        Arc::new(SequentialIdGenerator::new("s")),
    )
    .unwrap();

    assert!(session.commit().unwrap().reply.is_ok());

    let transport = session.into_transport();
    let written = String::from_utf8(transport.writer_ref().clone()).unwrap();
    assert!(written.ends_with("<commit/></rpc>]]>]]>"));
}
