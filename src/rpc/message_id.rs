//! Message id generation
//!
//! Ids are random version-4 UUIDs in lowercase 8-4-4-4-12 form, drawn from
//! the OS CSPRNG. The generator is a trait so sessions can be given a
//! deterministic one.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{NetconfError, Result};

/// Produces correlation ids for request envelopes
pub trait MessageIdGenerator: Send + Sync {
    fn next_id(&self) -> Result<String>;
}

/// Random UUIDv4 ids from the OS random source
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl MessageIdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Result<String> {
        generate_message_id()
    }
}

/// Deterministic `{prefix}-{n}` ids, counting from 1
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl MessageIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Result<String> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("{}-{}", self.prefix, n))
    }
}

/// Generate a fresh random message id
///
/// Fails with [`NetconfError::Generation`] if the random source cannot fill
/// the buffer; a partially filled buffer is never used.
pub fn generate_message_id() -> Result<String> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)
        .map_err(|e| NetconfError::Generation(format!("random source failed: {}", e)))?;
    Ok(format_uuid(bytes))
}

/// Force version/variant bits and render as 8-4-4-4-12 hex groups
fn format_uuid(mut bytes: [u8; 16]) -> String {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        // Writing to a String cannot fail
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
