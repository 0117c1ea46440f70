//! Transport Module
//!
//! The seam between this crate and whatever carries bytes to the device.
//!
//! A transport takes one complete request envelope and hands back one
//! complete reply; connection setup, authentication and timeouts live
//! behind it.

mod framed;

use bytes::Bytes;

use crate::error::Result;

pub use framed::{FramedTransport, END_OF_MESSAGE};

/// Request/reply exchange with a device
pub trait Transport {
    /// Send `request` and block until the whole reply has arrived
    fn round_trip(&mut self, request: &[u8]) -> Result<Bytes>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn round_trip(&mut self, request: &[u8]) -> Result<Bytes> {
        (**self).round_trip(request)
    }
}
