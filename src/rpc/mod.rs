//! RPC Module
//!
//! Request construction and reply interpretation for NETCONF base 1.0.
//!
//! ## Request Envelope
//! ```text
//! <rpc message-id="ID" xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">
//!   FRAGMENT 1 FRAGMENT 2 ...
//! </rpc>
//! ```
//!
//! ### Fragments
//! - lock / unlock:   `<lock><target><NAME/></target></lock>`
//! - get-config:      by datastore name, or `running` with a subtree filter
//! - edit-config:     `candidate` target with a configuration payload
//! - commit:          `<commit/>`
//! - discard-changes: `<discard-changes/>`
//!
//! ## Reply
//! ```text
//! <rpc-reply> <ok/>? <rpc-error>...</rpc-error>* <data>...</data>? </rpc-reply>
//! ```
//!
//! Whether the reply parses and whether the device reported errors are
//! separate outcomes: see [`decode_reply`].

mod message_id;
mod method;
mod envelope;
mod reply;

pub use message_id::{
    generate_message_id, MessageIdGenerator, RandomIdGenerator, SequentialIdGenerator,
};
pub use method::{datastore, Method};
pub use envelope::{wrap_fragments, RpcMessage, BASE_NAMESPACE};
pub use reply::{decode_reply, ReplyOutcome, RpcError, RpcReply, Severity};
