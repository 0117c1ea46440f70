//! # netconf-rpc
//!
//! The request/reply layer of a NETCONF client:
//! - Canonical encoding of RPC methods and configuration trees
//! - Batched `<rpc>` envelopes with fresh message ids
//! - Reply decoding with success/warning/error classification
//! - A pluggable transport seam with NETCONF 1.0 end-of-message framing
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Session                             │
//! │             (policy, id generator, transport)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Requests   │          │   Replies   │
//!   │ method/env. │          │ decode/class│
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌──────────────────────────────────────┐
//!   │      Configuration tree (XML)        │
//!   └──────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod tree;
pub mod rpc;
pub mod transport;
pub mod session;

mod xml;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NetconfError, Result};
pub use config::Config;
pub use rpc::{Method, ReplyOutcome, RpcError, RpcMessage, RpcReply, Severity};
pub use session::Session;
pub use tree::{Address, AddressBook, AddressSet, Configuration, EditOperation};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of netconf-rpc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
