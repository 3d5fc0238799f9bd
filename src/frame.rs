use crate::error::CaptureError;
use std::fmt;

/// Bytes per pixel of every frame handled by the pipeline
pub const CHANNELS: usize = 3;

/// Which camera of the stereo rig a stream belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Filename suffix for this side
    pub fn suffix(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// One value per camera
#[derive(Debug, Clone, Default)]
pub struct StereoPair<T> {
    pub left: T,
    pub right: T,
}

impl<T> StereoPair<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Byte order of the three channels inside a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Caller-owned copy of the most recently captured frame of one stream
///
/// Allocated once with the stream resolution and reused for every capture,
/// so it never aliases memory owned by a frame source.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; frame_len(width, height)],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy a whole source frame in one contiguous write
    pub fn copy_from(&mut self, side: Side, frame: &[u8]) -> Result<(), CaptureError> {
        if frame.len() != self.data.len() {
            return Err(CaptureError::FrameSize {
                side,
                expected: self.data.len(),
                actual: frame.len(),
            });
        }
        self.data.copy_from_slice(frame);
        Ok(())
    }
}

/// Byte length of a packed 3-channel frame
pub fn frame_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_sized_for_three_channels() {
        let buffer = FrameBuffer::new(4, 3);
        assert_eq!(buffer.as_bytes().len(), 36);
    }

    #[test]
    fn copy_replaces_entire_contents() {
        let mut buffer = FrameBuffer::new(2, 1);
        buffer.copy_from(Side::Left, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn copy_rejects_wrong_length() {
        let mut buffer = FrameBuffer::new(2, 1);
        let err = buffer.copy_from(Side::Right, &[0; 5]).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::FrameSize {
                side: Side::Right,
                expected: 6,
                actual: 5
            }
        ));
        assert_eq!(buffer.as_bytes(), &[0; 6]);
    }

    #[test]
    fn side_suffixes() {
        assert_eq!(Side::Left.suffix(), "L");
        assert_eq!(Side::Right.suffix(), "R");
    }
}
