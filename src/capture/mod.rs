mod webcam;

pub use webcam::WebcamCapture;

use crate::frame::ChannelOrder;
use anyhow::Result;

/// Trait for live camera streams
pub trait FrameSource {
    /// Get the resolution of produced frames, fixed for the source's lifetime
    fn resolution(&self) -> (u32, u32);

    /// Get the channel order of produced frames
    fn channel_order(&self) -> ChannelOrder;

    /// Poll for the newest decoded frame without waiting for one
    ///
    /// Returns `None` when no new frame is ready. The frame borrows the
    /// source and is overwritten by the next poll, so it must be copied
    /// out before polling again.
    fn poll_frame(&mut self) -> Result<Option<&[u8]>>;
}
