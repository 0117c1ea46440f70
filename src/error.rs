//! Error types for netconf-rpc
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::rpc::RpcError;

/// Result type alias using NetconfError
pub type Result<T> = std::result::Result<T, NetconfError>;

/// Unified error type for netconf-rpc operations
#[derive(Debug, Error)]
pub enum NetconfError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    /// The secure random source failed; no request may be sent.
    #[error("Message id generation failed: {0}")]
    Generation(String),

    #[error("Encode error: {0}")]
    Encode(String),

    // -------------------------------------------------------------------------
    // Reply Errors
    // -------------------------------------------------------------------------
    /// Reply bytes are not a well-formed `rpc-reply` document.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A device-reported error promoted to a failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
