//! # rfidrs-core
//!
//! Protocol layer for serial-attached RFID reader/writer devices.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame encoding/decoding with checksum validation
//! - Command and status definitions
//! - Beep duration conversion
//! - Protocol constants

pub mod beep;
pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod status;

pub use command::Command;
pub use constants::{LedMode, DEFAULT_BAUD_RATE, PREFIX};
pub use error::{Error, Result};
pub use frame::{Header, Request, Response};
pub use status::Status;
