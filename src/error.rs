use crate::frame::Side;
use std::path::PathBuf;
use std::time::Duration;

/// Failures of the stereo capture pipeline that callers may want to match on
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("stream resolutions differ: left is {left_width}x{left_height}, right is {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("{side} source produced a {actual} byte frame, expected {expected}")]
    FrameSize {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("no frame pair for capture {index:03} within {limit:?}")]
    AcquireTimeout { index: u32, limit: Duration },

    #[error("destination \"{0}\" exists and is not a directory")]
    DestinationNotDirectory(PathBuf),
}
