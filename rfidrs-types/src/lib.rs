//! Value types for rfidrs

pub mod device_info;
pub mod tag;

pub use device_info::DeviceInfo;
pub use tag::TagId;
