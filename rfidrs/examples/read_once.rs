//! Wait for a tag and print its identifier

use rfidrs::Device;

#[tokio::main]
async fn main() -> rfidrs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::var("RFID_DEVICE").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut device = Device::new(path);
    device.open().await?;

    let info = device.info().await?;
    println!("Reader: {info}");

    println!("Present a tag...");
    loop {
        if let Some(tag) = device.read_tag().await? {
            println!("{tag}");
            break;
        }
    }

    device.close().await?;
    Ok(())
}
