//! Session Module
//!
//! Drives one request/reply exchange end to end.
//!
//! ## Flow
//! 1. Draw a message id (a generator failure aborts before anything is sent)
//! 2. Render the methods into one envelope
//! 3. Hand the bytes to the transport and wait for the reply
//! 4. Decode and classify the reply under the session's policy

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::rpc::{decode_reply, Method, MessageIdGenerator, RandomIdGenerator, ReplyOutcome, RpcMessage};
use crate::transport::Transport;
use crate::tree::Configuration;

/// A NETCONF session over some transport
///
/// The transport sits behind a mutex so one session can be shared between
/// threads; exchanges are serialized, message ids are not shared state.
pub struct Session<T: Transport> {
    /// Session policy
    config: Config,

    /// Source of message ids
    ids: Arc<dyn MessageIdGenerator>,

    /// Exclusive access to the byte channel
    transport: Mutex<T>,
}

impl<T: Transport> Session<T> {
    /// Create a session with random message ids
    pub fn new(transport: T, config: Config) -> Result<Self> {
        Self::with_id_generator(transport, config, Arc::new(RandomIdGenerator))
    }

    /// Create a session with a specific id generator
    pub fn with_id_generator(
        transport: T,
        config: Config,
        ids: Arc<dyn MessageIdGenerator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ids,
            transport: Mutex::new(transport),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send `methods` in one envelope and classify the reply
    ///
    /// `Err` means the exchange itself failed (id generation, encoding,
    /// transport, undecodable reply). Device-reported errors come back in
    /// the outcome.
    pub fn exec(&self, methods: Vec<Method>) -> Result<ReplyOutcome> {
        let message = RpcMessage::new(methods, self.ids.as_ref())?;
        let request = message.encode()?;

        tracing::debug!(
            message_id = message.message_id(),
            methods = ?message.methods().iter().map(Method::name).collect::<Vec<_>>(),
            "Sending rpc"
        );
        tracing::trace!("Request: {}", request);

        let raw = self.transport.lock().round_trip(request.as_bytes())?;

        let outcome = decode_reply(&raw, message.message_id(), self.config.error_on_warning)?;
        if let Some(failure) = &outcome.failure {
            tracing::warn!(message_id = message.message_id(), "{}", failure);
        }
        Ok(outcome)
    }

    // =========================================================================
    // Single-Method Helpers
    // =========================================================================

    pub fn lock(&self, target: &str) -> Result<ReplyOutcome> {
        self.exec(vec![Method::lock(target)])
    }

    pub fn unlock(&self, target: &str) -> Result<ReplyOutcome> {
        self.exec(vec![Method::unlock(target)])
    }

    pub fn get_config(&self, source: &str) -> Result<ReplyOutcome> {
        self.exec(vec![Method::get_config(source)])
    }

    pub fn get_config_filtered(&self, filter: Configuration) -> Result<ReplyOutcome> {
        self.exec(vec![Method::get_config_filtered(filter)])
    }

    pub fn edit_config(&self, config: Configuration) -> Result<ReplyOutcome> {
        self.exec(vec![Method::edit_config(config)])
    }

    pub fn delete_config(&self, config: Configuration) -> Result<ReplyOutcome> {
        self.exec(vec![Method::delete_config(config)])
    }

    pub fn commit(&self) -> Result<ReplyOutcome> {
        self.exec(vec![Method::commit()])
    }

    pub fn discard_changes(&self) -> Result<ReplyOutcome> {
        self.exec(vec![Method::discard_changes()])
    }

    /// Take the transport back, ending the session
    pub fn into_transport(self) -> T {
        self.transport.into_inner()
    }
}
