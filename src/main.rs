mod capture;
mod color;
mod destination;
mod display;
mod error;
mod frame;
mod output;
mod sequencer;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use capture::WebcamCapture;
use clap::Parser;
use destination::{prepare_destination, DestinationState};
use display::{run_display_loop, PreviewWindow};
use frame::StereoPair;
use output::BmpWriter;
use sequencer::{AcquireLimit, CaptureSession};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the image pairs are written to
    destination: Option<PathBuf>,

    /// Device index of the left camera
    #[arg(long, default_value_t = 0)]
    left_device: u32,

    /// Device index of the right camera
    #[arg(long, default_value_t = 1)]
    right_device: u32,

    /// Width of each camera's half of the preview window
    #[arg(long, default_value_t = 640)]
    preview_width: usize,

    /// Height of the preview window
    #[arg(long, default_value_t = 480)]
    preview_height: usize,

    /// Give up on a capture if both cameras have not delivered a frame
    /// within this many milliseconds. Waits forever if not set
    #[arg(long)]
    acquire_timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

const DEFAULT_DESTINATION: &str = "calibration";

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let destination = match args.destination {
        Some(dir) => dir,
        None => {
            tracing::info!(
                "No destination given, using default \"{}\"",
                DEFAULT_DESTINATION
            );
            PathBuf::from(DEFAULT_DESTINATION)
        }
    };

    let state = prepare_destination(&destination, std::io::stdin().lock(), std::io::stdout())?;
    if state == DestinationState::Declined {
        return Ok(());
    }

    let left = WebcamCapture::new(args.left_device).context("Failed to initialize left camera")?;
    let right =
        WebcamCapture::new(args.right_device).context("Failed to initialize right camera")?;

    let limit = match args.acquire_timeout_ms {
        Some(ms) => AcquireLimit::Timeout(Duration::from_millis(ms)),
        None => AcquireLimit::Unbounded,
    };

    let mut session = CaptureSession::new(
        StereoPair::new(left, right),
        BmpWriter,
        destination,
        limit,
    )?;

    let (width, height) = session.resolution();
    tracing::info!("Streams: {}x{}", width, height);

    let mut window = PreviewWindow::new("Live Capture", args.preview_width, args.preview_height)
        .context("Failed to open preview window")?;

    run_display_loop(&mut session, &mut window)?;

    Ok(())
}
