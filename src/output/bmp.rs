use super::FrameWriter;
use crate::frame::ChannelOrder;
use anyhow::{Context, Result};
use image::{ExtendedColorType, ImageFormat};
use std::path::Path;

/// Writes uncompressed 24-bit bitmaps
#[derive(Debug, Default)]
pub struct BmpWriter;

impl FrameWriter for BmpWriter {
    fn extension(&self) -> &'static str {
        "bmp"
    }

    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }

    fn write_frame(&mut self, path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
        image::save_buffer_with_format(
            path,
            pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
            ImageFormat::Bmp,
        )
        .with_context(|| format!("Failed to encode bitmap {}", path.display()))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_readable_bitmap_in_rgb_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.bmp");
        let pixels = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];

        BmpWriter.write_frame(&path, 2, 2, &pixels).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("pair.bmp");

        assert!(BmpWriter.write_frame(&path, 1, 1, &[1, 2, 3]).is_err());
    }
}
