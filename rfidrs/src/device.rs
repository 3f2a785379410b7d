//! High-level device interface

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, trace};

use rfidrs_core::frame::{self, Header, Request, Response};
use rfidrs_core::{beep, Command, LedMode, Status};
use rfidrs_transport::{SerialSettings, SerialTransport, Transport};
use rfidrs_types::{DeviceInfo, TagId};

use crate::error::{Error, Result};

/// RFID reader/writer device
///
/// Owns the transport and exposes one method per device operation. Every
/// operation is a single request/response round trip with no retry, and
/// operations take `&mut self`, so a session never has more than one
/// exchange in flight.
///
/// # Examples
///
/// ```no_run
/// use rfidrs::Device;
///
/// #[tokio::main]
/// async fn main() -> rfidrs::Result<()> {
///     let mut device = Device::new("/dev/ttyUSB0");
///     device.open().await?;
///
///     match device.read_tag().await? {
///         Some(tag) => println!("{tag}"),
///         None => println!("no tag present"),
///     }
///
///     device.close().await?;
///     Ok(())
/// }
/// ```
pub struct Device {
    transport: Box<dyn Transport>,
}

impl Device {
    /// Create a device on the serial interface at `path`, using the
    /// reader's native line settings.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_settings(SerialSettings::new(path))
    }

    /// Create a device with explicit serial settings.
    pub fn with_settings(settings: SerialSettings) -> Self {
        Self {
            transport: Box::new(SerialTransport::new(settings)),
        }
    }

    /// Create a device over an already-constructed transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Open the transport.
    pub async fn open(&mut self) -> Result<()> {
        info!("Opening {}...", self.transport.endpoint());
        self.transport.open().await?;
        Ok(())
    }

    /// Close the transport.
    pub async fn close(&mut self) -> Result<()> {
        info!("Closing {}...", self.transport.endpoint());
        self.transport.close().await?;
        Ok(())
    }

    /// Check if the transport is open.
    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Read the device model information.
    pub async fn info(&mut self) -> Result<DeviceInfo> {
        debug!("Reading device info...");

        let (status, answer) = self.raw_command(Command::Info, &[]).await?;
        if !status.is_ok() {
            return Err(Error::UnexpectedStatus(status.into()));
        }

        Ok(DeviceInfo::new(String::from_utf8_lossy(&answer).into_owned()))
    }

    /// Beep for `duration`, waiting until the device acknowledges.
    ///
    /// The duration is truncated to whole beep units (~1/255 s); a nonzero
    /// duration always beeps for at least one unit, and anything above 255
    /// units is clamped to 255. A zero duration beeps until the device is
    /// told otherwise, so this call then waits indefinitely for the
    /// acknowledgement.
    pub async fn beep(&mut self, duration: Duration) -> Result<()> {
        let units = beep::units(duration);
        debug!(units, "Beeping...");

        let (status, _) = self.raw_command(Command::Beep, &[units]).await?;
        if !status.is_ok() {
            return Err(Error::UnexpectedStatus(status.into()));
        }

        Ok(())
    }

    /// Switch the device LED to a given mode - off, red, green.
    pub async fn change_led(&mut self, mode: LedMode) -> Result<()> {
        debug!(?mode, "Changing LED...");

        let (status, _) = self.raw_command(Command::Led, &[mode.into()]).await?;
        if !status.is_ok() {
            return Err(Error::UnexpectedStatus(status.into()));
        }

        Ok(())
    }

    /// Probe for a tag.
    ///
    /// Returns `Ok(Some(tag))` when a tag is in the field and `Ok(None)`
    /// when the reader detects none - an expected outcome while polling,
    /// not an error.
    pub async fn read_tag(&mut self) -> Result<Option<TagId>> {
        let (status, answer) = self.raw_command(Command::Read, &[]).await?;

        match status {
            Status::Ok => Ok(Some(TagId::new(answer.to_vec()))),
            Status::NoTag => Ok(None),
            other => Err(Error::UnexpectedStatus(other.into())),
        }
    }

    /// Send a raw command and return the response status and answer bytes.
    ///
    /// The escape hatch underlying every typed operation; also the only
    /// path to the write commands, which have no typed wrapper.
    pub async fn raw_command(&mut self, command: Command, data: &[u8]) -> Result<(Status, Bytes)> {
        self.ensure_open()?;

        let request = Request::new(command, data.to_vec());
        trace!("TX: {:?}", request);

        self.transport
            .send(&request.encode())
            .await
            .map_err(Error::Send)?;

        let response = self.receive_response().await?;
        trace!("RX: {:?}", response);

        Ok((response.status, response.answer))
    }

    // Helper methods

    fn ensure_open(&self) -> Result<()> {
        if !self.is_open() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }

    async fn receive_response(&mut self) -> Result<Response> {
        let header = self
            .transport
            .recv_exact(frame::HEADER_LEN)
            .await
            .map_err(Error::Receive)?;
        let header = Header::parse(&header)?;

        let body = self
            .transport
            .recv_exact(header.body_len())
            .await
            .map_err(Error::Receive)?;

        Ok(Response::parse(&body)?)
    }
}
