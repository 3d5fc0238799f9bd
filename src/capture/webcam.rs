use super::FrameSource;
use crate::frame::{frame_len, ChannelOrder};
use anyhow::{anyhow, bail, Context, Result};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::CallbackCamera;
use std::sync::{Arc, Mutex};

/// Webcam streamed on nokhwa's capture thread
///
/// The capture thread decodes every frame into a shared slot; polling only
/// checks that slot, so it never waits on the device.
pub struct WebcamCapture {
    camera: CallbackCamera,
    slot: Arc<FrameSlot>,
    width: u32,
    height: u32,
    latest: Vec<u8>,
}

impl WebcamCapture {
    pub fn new(device_index: u32) -> Result<Self> {
        tracing::info!("Initializing webcam {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let slot = Arc::new(FrameSlot::default());
        let producer = Arc::clone(&slot);

        let mut camera = CallbackCamera::new(index, requested, move |buffer| {
            producer.publish(|pixels| {
                buffer
                    .decode_image_to_buffer::<RgbFormat>(pixels)
                    .context("Failed to decode frame")
            });
        })
        .with_context(|| format!("Failed to open camera {}", device_index))?;

        let resolution = camera
            .resolution()
            .with_context(|| format!("Failed to query resolution of camera {}", device_index))?;
        let (width, height) = (resolution.width(), resolution.height());
        slot.resize(frame_len(width, height))?;

        camera
            .open_stream()
            .with_context(|| format!("Failed to open stream of camera {}", device_index))?;

        tracing::info!(
            "Webcam {} ({}) streaming at {}x{}",
            device_index,
            camera.info().human_name(),
            width,
            height
        );

        Ok(Self {
            camera,
            slot,
            width,
            height,
            latest: vec![0; frame_len(width, height)],
        })
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!("Failed to stop camera stream: {}", e);
        }
    }
}

impl FrameSource for WebcamCapture {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }

    fn poll_frame(&mut self) -> Result<Option<&[u8]>> {
        if self.slot.take_into(&mut self.latest)? {
            Ok(Some(self.latest.as_slice()))
        } else {
            Ok(None)
        }
    }
}

/// Newest decoded frame handed from the capture thread to the poller
#[derive(Default)]
pub(crate) struct FrameSlot {
    inner: Mutex<SlotState>,
}

#[derive(Default)]
struct SlotState {
    pixels: Vec<u8>,
    fresh: bool,
    error: Option<String>,
}

impl FrameSlot {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, SlotState>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("Frame slot poisoned by the capture thread"))
    }

    /// Size the slot for frames of `len` bytes
    pub(crate) fn resize(&self, len: usize) -> Result<()> {
        self.lock()?.pixels.resize(len, 0);
        Ok(())
    }

    /// Decode a new frame into the slot, replacing any frame not yet taken
    pub(crate) fn publish<F>(&self, decode: F)
    where
        F: FnOnce(&mut [u8]) -> Result<()>,
    {
        let Ok(mut state) = self.lock() else {
            return;
        };

        match decode(state.pixels.as_mut_slice()) {
            Ok(()) => {
                state.fresh = true;
                state.error = None;
            }
            Err(e) => state.error = Some(format!("{:#}", e)),
        }
    }

    /// Move the newest frame into `dst` if one arrived since the last take
    ///
    /// Returns `false` without touching `dst` when nothing new is ready.
    pub(crate) fn take_into(&self, dst: &mut Vec<u8>) -> Result<bool> {
        let mut state = self.lock()?;

        if let Some(error) = state.error.take() {
            bail!(error);
        }
        if !state.fresh {
            return Ok(false);
        }

        // Swap so the capture thread reuses the old buffer for the next frame
        std::mem::swap(&mut state.pixels, dst);
        state.fresh = false;
        Ok(true)
    }
}
