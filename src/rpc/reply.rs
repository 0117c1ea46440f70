//! Reply decoding and classification
//!
//! A reply goes through two independent checks:
//! 1. Structure: the bytes must be a well-formed `<rpc-reply>` document,
//!    otherwise decoding fails with [`NetconfError::Decode`] and nothing
//!    from the reply is returned.
//! 2. Outcome: the device may report `<rpc-error>`s inside a perfectly
//!    good reply. The first one that qualifies under the severity policy
//!    is surfaced as the failure; every error stays on the reply.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::error::{NetconfError, Result};
use crate::tree::decode::decode_configuration;
use crate::tree::Configuration;
use crate::xml::{Element, XmlCursor};

// =============================================================================
// Errors Reported by the Device
// =============================================================================

/// Severity of an `<rpc-error>`
///
/// Values other than `warning` and `error` are kept as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
    Other(String),
}

impl Severity {
    /// Surrounding whitespace is ignored when matching the known values
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Other(value) => value.as_str(),
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Other(String::new())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<rpc-error>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("netconf rpc [{severity}] '{message}'")]
pub struct RpcError {
    pub error_type: String,
    pub tag: String,
    pub severity: Severity,
    pub path: String,
    pub message: String,
    /// Verbatim inner XML of the element
    pub info: String,
}

impl RpcError {
    /// Whether this error counts as a failure under the given policy
    pub fn is_failure(&self, error_on_warning: bool) -> bool {
        match self.severity {
            Severity::Error => true,
            Severity::Warning => error_on_warning,
            Severity::Other(_) => false,
        }
    }
}

// =============================================================================
// Reply
// =============================================================================

/// A decoded `<rpc-reply>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcReply {
    raw: Bytes,
    ok: bool,
    errors: Vec<RpcError>,
    data: Option<Configuration>,
    message_id: String,
}

impl RpcReply {
    /// Structurally decode reply bytes
    ///
    /// `message_id` is the id of the request this reply answers. An empty
    /// id skips the check against the echoed `message-id` attribute.
    pub fn parse(raw: &[u8], message_id: &str) -> Result<Self> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| NetconfError::Decode(format!("reply is not valid UTF-8: {}", e)))?;
        let mut cur = XmlCursor::new(text);

        let root = cur
            .next_root()?
            .ok_or_else(|| NetconfError::Decode("reply has no root element".to_string()))?;
        if root.name() != b"rpc-reply" {
            return Err(NetconfError::Decode(format!(
                "expected <rpc-reply>, found <{}>",
                String::from_utf8_lossy(root.name())
            )));
        }
        if let Some(echoed) = root.attribute(b"message-id")? {
            if !message_id.is_empty() && echoed != message_id {
                tracing::warn!(
                    expected = message_id,
                    echoed = %echoed,
                    "Reply message-id does not match request"
                );
            }
        }

        let mut errors = Vec::new();
        let mut data = None;
        if !root.is_empty() {
            while let Some(child) = cur.next_child()? {
                match child.name() {
                    b"rpc-error" => errors.push(decode_rpc_error(&mut cur, &child)?),
                    b"data" => data = decode_data(&mut cur, &child)?,
                    _ => cur.skip(&child)?,
                }
            }
        }

        Ok(Self {
            raw: Bytes::copy_from_slice(raw),
            ok: cur.saw_ok(),
            errors,
            data,
            message_id: message_id.to_string(),
        })
    }

    /// Reply bytes exactly as received
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Reply as text (always valid UTF-8 once parsed)
    pub fn raw_str(&self) -> &str {
        std::str::from_utf8(&self.raw).unwrap_or_default()
    }

    /// Whether the device sent an `<ok/>` marker
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// All reported errors, in document order
    pub fn errors(&self) -> &[RpcError] {
        &self.errors
    }

    /// Configuration carried in `<data>`, if any
    pub fn data(&self) -> Option<&Configuration> {
        self.data.as_ref()
    }

    /// Id of the request this reply answers
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// First error that qualifies as a failure under the policy
    pub fn failure(&self, error_on_warning: bool) -> Option<&RpcError> {
        self.errors.iter().find(|e| e.is_failure(error_on_warning))
    }
}

/// A decoded reply plus the failure promoted from it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    pub reply: RpcReply,
    pub failure: Option<RpcError>,
}

impl ReplyOutcome {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Collapse into a plain result, giving up the reply on failure
    pub fn into_result(self) -> Result<RpcReply> {
        match self.failure {
            Some(error) => Err(NetconfError::Rpc(error)),
            None => Ok(self.reply),
        }
    }
}

/// Decode reply bytes and classify the outcome
///
/// Errors only for undecodable input. Device-reported failures come back
/// inside the [`ReplyOutcome`], alongside the full reply.
pub fn decode_reply(raw: &[u8], message_id: &str, error_on_warning: bool) -> Result<ReplyOutcome> {
    let reply = RpcReply::parse(raw, message_id)?;
    let failure = reply.failure(error_on_warning).cloned();

    tracing::debug!(
        message_id,
        ok = reply.is_ok(),
        errors = reply.errors().len(),
        failed = failure.is_some(),
        "Decoded rpc-reply"
    );

    Ok(ReplyOutcome { reply, failure })
}

// =============================================================================
// Element Decoders
// =============================================================================

fn decode_rpc_error(cur: &mut XmlCursor<'_>, element: &Element<'_>) -> Result<RpcError> {
    let mut error = RpcError::default();
    if element.is_empty() {
        return Ok(error);
    }

    let inner_start = cur.position();
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"error-type" => error.error_type = cur.text(&child)?,
            b"error-tag" => error.tag = cur.text(&child)?,
            b"error-severity" => error.severity = Severity::parse(&cur.text(&child)?),
            b"error-path" => error.path = cur.text(&child)?,
            b"error-message" => error.message = cur.text(&child)?,
            _ => cur.skip(&child)?,
        }
    }
    error.info = cur.slice(inner_start, cur.closing_tag_start()).to_string();

    Ok(error)
}

fn decode_data(cur: &mut XmlCursor<'_>, element: &Element<'_>) -> Result<Option<Configuration>> {
    if element.is_empty() {
        return Ok(None);
    }
    let mut config = None;
    while let Some(child) = cur.next_child()? {
        match child.name() {
            b"configuration" => config = Some(decode_configuration(cur, &child)?),
            _ => cur.skip(&child)?,
        }
    }
    Ok(config)
}
