//! # rfidrs
//!
//! Driver for serial-attached RFID reader/writer devices speaking a small
//! prefix-framed binary request/response protocol.
//!
//! ## Quick start
//!
//! ```no_run
//! use rfidrs::Device;
//!
//! #[tokio::main]
//! async fn main() -> rfidrs::Result<()> {
//!     let mut device = Device::new("/dev/ttyUSB0");
//!     device.open().await?;
//!
//!     let info = device.info().await?;
//!     println!("{info}");
//!
//!     if let Some(tag) = device.read_tag().await? {
//!         println!("{tag}");
//!     }
//!
//!     device.close().await?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;

// Re-exports
pub use device::Device;
pub use error::{Error, Result};

// Re-export protocol vocabulary
pub use rfidrs_core::{Command, LedMode, Status};
pub use rfidrs_types::{DeviceInfo, TagId};
