//! Request envelope
//!
//! Wraps one or more fragments in a single `<rpc>` element. Several
//! fragments in one envelope is how requests are pipelined; their order
//! on the wire is the order given here.

use quick_xml::escape::escape;

use crate::error::Result;
use super::message_id::MessageIdGenerator;
use super::method::Method;

/// Namespace of the NETCONF base 1.0 protocol
pub const BASE_NAMESPACE: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

/// An outbound `<rpc>` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcMessage {
    message_id: String,
    methods: Vec<Method>,
}

impl RpcMessage {
    /// Build a message with a fresh id from `ids`
    pub fn new(methods: Vec<Method>, ids: &dyn MessageIdGenerator) -> Result<Self> {
        let message_id = ids.next_id()?;
        Ok(Self::with_message_id(message_id, methods))
    }

    /// Build a message with a caller-supplied id
    pub fn with_message_id(message_id: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            message_id: message_id.into(),
            methods,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Render every method and wrap them in the envelope
    pub fn encode(&self) -> Result<String> {
        let fragments = self
            .methods
            .iter()
            .map(Method::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(wrap_fragments(&self.message_id, &fragments))
    }
}

/// Concatenate fragments verbatim inside an `<rpc>` element
pub fn wrap_fragments<S: AsRef<str>>(message_id: &str, fragments: &[S]) -> String {
    let inner_len: usize = fragments.iter().map(|f| f.as_ref().len()).sum();
    let mut out = String::with_capacity(inner_len + message_id.len() + BASE_NAMESPACE.len() + 40);

    out.push_str("<rpc message-id=\"");
    out.push_str(&escape(message_id));
    out.push_str("\" xmlns=\"");
    out.push_str(BASE_NAMESPACE);
    out.push_str("\">");
    for fragment in fragments {
        out.push_str(fragment.as_ref());
    }
    out.push_str("</rpc>");
    out
}
