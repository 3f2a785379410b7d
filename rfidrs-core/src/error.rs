//! Error types for rfidrs-core

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Frame codec errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fewer bytes than a frame header holds
    #[error("truncated frame header: got {available} of 4 bytes")]
    TruncatedHeader {
        available: usize,
    },

    /// Frame does not start with the protocol prefix
    #[error("bad frame prefix: 0x{received:04X}")]
    BadPrefix {
        received: u16,
    },

    /// Declared length cannot hold a well-formed response body
    #[error("invalid frame length: {length}")]
    InvalidLength {
        length: u16,
    },

    /// Checksum verification failed
    #[error("checksum mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    ChecksumMismatch {
        expected: u8,
        received: u8,
    },

    /// Unknown command code
    #[error("unknown command code: 0x{0:04X}")]
    UnknownCommand(u16),
}
