//! End-of-message framed stream transport
//!
//! NETCONF 1.0 framing over any byte stream (an SSH channel, a pipe, a
//! socket).
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────┬──────────────┐
//! │        XML message          │   ]]>]]>     │
//! └─────────────────────────────┴──────────────┘
//! ```

use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use bytes::{Buf, Bytes, BytesMut};

use crate::config::{Config, DEFAULT_MAX_MESSAGE_SIZE};
use crate::error::{NetconfError, Result};
use super::Transport;

/// Message delimiter for base 1.0 framing
pub const END_OF_MESSAGE: &[u8] = b"]]>]]>";

/// Transport speaking end-of-message framing over a reader/writer pair
pub struct FramedTransport<R: Read, W: Write> {
    /// Incoming stream (buffered for efficiency)
    reader: BufReader<R>,

    /// Outgoing stream (buffered for efficiency)
    writer: BufWriter<W>,

    /// Bytes received but not yet returned as a message
    pending: BytesMut,

    /// Give up on a message once it grows past this many bytes
    max_message_size: usize,

    /// Set once an oversized message left the stream without a known boundary
    closed: bool,
}

impl<R: Read, W: Write> FramedTransport<R, W> {
    /// Create a transport with the default size limit
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_max_message_size(reader, writer, DEFAULT_MAX_MESSAGE_SIZE)
    }

    /// Create a transport honouring the session config's size limit
    pub fn from_config(reader: R, writer: W, config: &Config) -> Self {
        Self::with_max_message_size(reader, writer, config.max_message_size)
    }

    pub fn with_max_message_size(reader: R, writer: W, max_message_size: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            pending: BytesMut::new(),
            max_message_size,
            closed: false,
        }
    }

    /// Write one message followed by the delimiter
    pub fn send(&mut self, message: &[u8]) -> Result<()> {
        self.writer.write_all(message)?;
        self.writer.write_all(END_OF_MESSAGE)?;
        self.writer.flush()?;
        tracing::trace!("Sent {} byte message", message.len());
        Ok(())
    }

    /// Read until the next delimiter and return the message before it
    ///
    /// Blocks until a complete message is received or an error occurs.
    ///
    /// An oversized message whose delimiter has already arrived is dropped
    /// and the next call reads the message after it. When the limit is hit
    /// before any delimiter the message boundary is lost, so the transport
    /// closes and every later call fails.
    pub fn receive(&mut self) -> Result<Bytes> {
        if self.closed {
            return Err(NetconfError::Transport(
                "Transport closed after an oversized message".to_string(),
            ));
        }

        let mut scanned = 0;
        loop {
            if let Some(pos) = find_delimiter(&self.pending, scanned) {
                if pos > self.max_message_size {
                    self.pending.advance(pos + END_OF_MESSAGE.len());
                    tracing::warn!("Dropped {} byte message over the size limit", pos);
                    return Err(self.too_large());
                }
                let message = self.pending.split_to(pos).freeze();
                self.pending.advance(END_OF_MESSAGE.len());
                tracing::trace!("Received {} byte message", message.len());
                return Ok(message);
            }
            // A delimiter may straddle the next read
            scanned = self.pending.len().saturating_sub(END_OF_MESSAGE.len() - 1);

            if self.pending.len() > self.max_message_size {
                self.pending.clear();
                self.closed = true;
                tracing::warn!("Closing transport: message exceeds {} bytes", self.max_message_size);
                return Err(self.too_large());
            }

            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Err(if self.pending.is_empty() {
                    NetconfError::Io(std::io::ErrorKind::UnexpectedEof.into())
                } else {
                    NetconfError::Transport(format!(
                        "Stream closed with {} bytes of an unfinished message",
                        self.pending.len()
                    ))
                });
            }
            let len = available.len();
            self.pending.extend_from_slice(available);
            self.reader.consume(len);
        }
    }

    fn too_large(&self) -> NetconfError {
        NetconfError::Transport(format!(
            "Message too large: exceeds {} bytes",
            self.max_message_size
        ))
    }

    /// Get a reference to the outgoing stream
    pub fn writer_ref(&self) -> &W {
        self.writer.get_ref()
    }
}

impl<R: Read, W: Write> Transport for FramedTransport<R, W> {
    fn round_trip(&mut self, request: &[u8]) -> Result<Bytes> {
        self.send(request)?;
        self.receive()
    }
}

fn find_delimiter(haystack: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(END_OF_MESSAGE.len())
        .position(|window| window == END_OF_MESSAGE)
        .map(|pos| from + pos)
}
