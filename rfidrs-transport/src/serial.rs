//! Serial port transport
//!
//! The reader hangs off a USB serial adapter and speaks 38400 8N1 with no
//! flow control.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;
use tokio_serial::{DataBits, FlowControl, Parity, SerialStream, StopBits};
use tracing::{debug, trace, warn};

use rfidrs_core::DEFAULT_BAUD_RATE;

use crate::{error::*, Transport};

/// Serial line settings for the reader device.
#[derive(Debug, Clone)]
pub struct SerialSettings {
    pub path: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub flow_control: FlowControl,

    /// Optional read deadline. `None` (the default) waits as long as the
    /// device takes, which an indefinite beep legitimately requires.
    pub read_timeout: Option<Duration>,
}

impl SerialSettings {
    /// Settings for a reader at `path` using the device's native line
    /// parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
            read_timeout: None,
        }
    }

    /// Set a read deadline.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// Serial transport for reader devices.
pub struct SerialTransport {
    settings: SerialSettings,
    stream: Option<SerialStream>,
}

impl SerialTransport {
    /// Create a new serial transport (not yet open).
    pub fn new(settings: SerialSettings) -> Self {
        Self {
            settings,
            stream: None,
        }
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        debug!(
            "Opening {} at {} baud...",
            self.settings.path, self.settings.baud_rate
        );

        let builder = tokio_serial::new(&self.settings.path, self.settings.baud_rate)
            .data_bits(self.settings.data_bits)
            .stop_bits(self.settings.stop_bits)
            .parity(self.settings.parity)
            .flow_control(self.settings.flow_control);

        let stream = SerialStream::open(&builder)?;

        debug!("Opened {}", self.settings.path);

        self.stream = Some(stream);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Closing {}...", self.settings.path);
            let _ = stream.flush().await;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotOpen)?;

        trace!("TX {} bytes: {:02X?}", data.len(), data);

        stream.write_all(data).await?;
        stream.flush().await?;

        Ok(())
    }

    async fn recv_exact(&mut self, len: usize) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotOpen)?;

        let mut buf = BytesMut::zeroed(len);

        match self.settings.read_timeout {
            Some(deadline) => {
                timeout(deadline, stream.read_exact(&mut buf[..]))
                    .await
                    .map_err(|_| Error::ReadTimeout)??;
            }
            None => {
                stream.read_exact(&mut buf[..]).await?;
            }
        }

        trace!("RX {} bytes: {:02X?}", len, &buf[..]);

        Ok(buf)
    }

    fn endpoint(&self) -> String {
        self.settings.path.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("Serial transport dropped while still open");
        }
    }
}
