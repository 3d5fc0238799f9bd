//! In-memory stand-ins for cameras and encoders

use crate::capture::FrameSource;
use crate::frame::{frame_len, ChannelOrder};
use crate::output::FrameWriter;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Frame source that replays a script of poll results, cycling forever
///
/// An empty script never yields a frame.
pub struct ScriptedSource {
    width: u32,
    height: u32,
    order: ChannelOrder,
    script: Vec<Option<Vec<u8>>>,
    latest: Vec<u8>,
    pub polls: usize,
}

impl ScriptedSource {
    pub fn new(width: u32, height: u32, script: Vec<Option<Vec<u8>>>) -> Self {
        Self {
            width,
            height,
            order: ChannelOrder::Rgb,
            script,
            latest: Vec::new(),
            polls: 0,
        }
    }

    /// A source that yields the same solid frame on every poll
    pub fn steady(width: u32, height: u32, fill: u8) -> Self {
        Self::new(width, height, vec![Some(vec![fill; frame_len(width, height)])])
    }

    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }
}

impl FrameSource for ScriptedSource {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    fn poll_frame(&mut self) -> Result<Option<&[u8]>> {
        let step = match self.script.len() {
            0 => None,
            len => self.script[self.polls % len].clone(),
        };
        self.polls += 1;

        match step {
            Some(frame) => {
                self.latest = frame;
                Ok(Some(self.latest.as_slice()))
            }
            None => Ok(None),
        }
    }
}

/// Writer that keeps every frame in memory and can be told to fail
#[derive(Default)]
pub struct RecordingWriter {
    fail_on: Option<String>,
    pub attempts: Vec<PathBuf>,
    pub saved: Vec<(PathBuf, Vec<u8>)>,
}

impl RecordingWriter {
    /// Fail any write whose file name equals `file_name`
    pub fn failing_on(file_name: &str) -> Self {
        Self {
            fail_on: Some(file_name.to_string()),
            ..Self::default()
        }
    }
}

impl FrameWriter for RecordingWriter {
    fn extension(&self) -> &'static str {
        "bmp"
    }

    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }

    fn write_frame(&mut self, path: &Path, _width: u32, _height: u32, pixels: &[u8]) -> Result<()> {
        self.attempts.push(path.to_path_buf());

        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        if name.is_some() && name == self.fail_on {
            bail!("disk full");
        }

        self.saved.push((path.to_path_buf(), pixels.to_vec()));
        Ok(())
    }
}
