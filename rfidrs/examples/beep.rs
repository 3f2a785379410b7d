//! Flash the LED green and beep briefly

use std::time::Duration;

use rfidrs::{Device, LedMode};

#[tokio::main]
async fn main() -> rfidrs::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::var("RFID_DEVICE").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut device = Device::new(path);
    device.open().await?;

    device.change_led(LedMode::Green).await?;
    device.beep(Duration::from_millis(100)).await?;
    device.change_led(LedMode::Off).await?;

    device.close().await?;
    Ok(())
}
