//! Device-level error types

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by device operations.
///
/// Transport and codec failures propagate unchanged, wrapped with the
/// phase of the exchange that produced them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Port lifecycle failure (open/close)
    #[error("transport error: {0}")]
    Transport(#[from] rfidrs_transport::Error),

    /// The write leg of an exchange failed
    #[error("error sending command: {0}")]
    Send(#[source] rfidrs_transport::Error),

    /// The read leg of an exchange failed
    #[error("error reading response: {0}")]
    Receive(#[source] rfidrs_transport::Error),

    /// The response failed frame validation
    #[error("malformed response: {0}")]
    Frame(#[from] rfidrs_core::Error),

    /// Well-formed response with a status the operation does not accept
    #[error("device returned unexpected status 0x{0:02X}")]
    UnexpectedStatus(u8),

    /// Operation attempted before the port was opened
    #[error("device not open")]
    NotOpen,
}
