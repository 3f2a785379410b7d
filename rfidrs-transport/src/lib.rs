//! Transport layer for RFID reader devices
//!
//! Provides the duplex byte-stream contract the device session drives,
//! and its serial-port implementation.

pub mod error;
pub mod serial;

pub use error::{Error, Result};
pub use serial::{SerialSettings, SerialTransport};

use async_trait::async_trait;
use bytes::BytesMut;

/// Duplex byte-stream transport to a reader device.
///
/// The protocol has no request identifiers or multiplexing, so the
/// transport is driven one exchange at a time through `&mut self`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the underlying stream.
    async fn open(&mut self) -> Result<()>;

    /// Close the underlying stream.
    async fn close(&mut self) -> Result<()>;

    /// Check if the stream is open.
    fn is_open(&self) -> bool;

    /// Write all of `data` to the stream.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read exactly `len` bytes from the stream.
    ///
    /// Waits until `len` bytes have arrived, the configured deadline (if
    /// any) expires, or the stream fails.
    async fn recv_exact(&mut self, len: usize) -> Result<BytesMut>;

    /// Human-readable endpoint description (the device path).
    fn endpoint(&self) -> String;
}
