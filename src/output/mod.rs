mod bmp;

pub use bmp::BmpWriter;

use crate::frame::ChannelOrder;
use anyhow::Result;
use std::path::Path;

/// Trait for image file encoders
pub trait FrameWriter {
    /// File extension of the encoded format, without the dot
    fn extension(&self) -> &'static str;

    /// Channel order the writer expects in `pixels`
    fn channel_order(&self) -> ChannelOrder;

    /// Encode a packed 3-channel frame and write it to `path`
    fn write_frame(&mut self, path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<()>;
}
