//! Command-line frontend for the reader: print device info, read one tag,
//! or poll continuously.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rfidrs::{Device, LedMode, TagId};

#[derive(Parser, Debug)]
#[command(name = "rfidrs", version, about = "Serial RFID reader/writer frontend")]
struct Cli {
    /// RFID reader/writer serial interface device
    #[arg(long, default_value = "/dev/ttyUSB0")]
    device: String,

    /// Application mode
    #[arg(long, value_enum, default_value_t = Mode::Read)]
    mode: Mode,

    /// Skip beeps and LED flashes, reduces the number of commands sent to
    /// the reader
    #[arg(long)]
    silent: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Wait for one tag, print it, exit
    Read,

    /// Print every newly presented tag, forever
    ReadLoop,

    /// Print the device model string
    Info,
}

/// Audible/visual feedback configuration, built once from the parsed
/// arguments and passed to wherever feedback is emitted.
#[derive(Copy, Clone, Debug)]
struct Feedback {
    silent: bool,
}

impl Feedback {
    async fn ok(&self, device: &mut Device) {
        self.emit(device, Duration::from_millis(50), LedMode::Green)
            .await;
    }

    async fn error(&self, device: &mut Device) {
        self.emit(device, Duration::from_millis(200), LedMode::Red)
            .await;
    }

    async fn emit(&self, device: &mut Device, duration: Duration, color: LedMode) {
        if self.silent {
            return;
        }
        if let Err(err) = device.change_led(color).await {
            warn!("feedback failed: {err}");
            return;
        }
        if let Err(err) = device.beep(duration).await {
            warn!("feedback failed: {err}");
            return;
        }
        if let Err(err) = device.change_led(LedMode::Off).await {
            warn!("feedback failed: {err}");
        }
    }
}

/// Poll until the reader sees a tag.
async fn read_once(device: &mut Device) -> rfidrs::Result<TagId> {
    loop {
        if let Some(tag) = device.read_tag().await? {
            return Ok(tag);
        }
    }
}

async fn info_mode(device: &mut Device) -> anyhow::Result<()> {
    let info = device.info().await?;
    println!("{info}");
    Ok(())
}

async fn read_mode(device: &mut Device, feedback: Feedback) -> anyhow::Result<()> {
    match read_once(device).await {
        Ok(tag) => {
            println!("{tag}");
            feedback.ok(device).await;
            Ok(())
        }
        Err(err) => {
            feedback.error(device).await;
            Err(err.into())
        }
    }
}

async fn read_loop_mode(device: &mut Device, feedback: Feedback) -> anyhow::Result<()> {
    let mut last: Option<TagId> = None;
    loop {
        let tag = match read_once(device).await {
            Ok(tag) => tag,
            // A malformed frame means the byte stream lost sync; bail out.
            Err(err @ rfidrs::Error::Frame(_)) => return Err(err.into()),
            // Anything else is transient while a tag is being presented.
            Err(_) => continue,
        };
        if last.as_ref() == Some(&tag) {
            continue;
        }
        println!("{tag}");
        feedback.ok(device).await;
        last = Some(tag);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut device = Device::new(&cli.device);
    device
        .open()
        .await
        .with_context(|| format!("opening {}", cli.device))?;

    let feedback = Feedback { silent: cli.silent };

    // Park the LED in a known state before doing anything else.
    if !cli.silent {
        device
            .change_led(LedMode::Off)
            .await
            .context("switching LED off")?;
    }

    match cli.mode {
        Mode::Info => info_mode(&mut device).await,
        Mode::Read => read_mode(&mut device, feedback).await,
        Mode::ReadLoop => read_loop_mode(&mut device, feedback).await,
    }
}
