use crate::capture::FrameSource;
use crate::color::swap_red_blue;
use crate::error::CaptureError;
use crate::frame::{ChannelOrder, FrameBuffer, Side, StereoPair};
use crate::output::FrameWriter;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Filename prefix of every captured image
pub const CAPTURE_PREFIX: &str = "capture";

/// Minimum number of digits of the capture index in filenames
pub const INDEX_WIDTH: usize = 3;

const SIDES: [Side; 2] = [Side::Left, Side::Right];

/// Path of one side's image for a capture index
pub fn capture_path(destination: &Path, index: u32, side: Side, extension: &str) -> PathBuf {
    destination.join(format!(
        "{}_{:0width$}_{}.{}",
        CAPTURE_PREFIX,
        index,
        side.suffix(),
        extension,
        width = INDEX_WIDTH
    ))
}

/// How long a trigger may wait for both streams to deliver a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquireLimit {
    /// Spin until both frames arrive, however long that takes
    #[default]
    Unbounded,
    /// Abandon the trigger once this much time has passed
    Timeout(Duration),
}

/// Result of a single capture trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved {
        index: u32,
        left: PathBuf,
        right: PathBuf,
    },
    /// The writer failed on `path`; the session is now terminating
    PersistFailed { index: u32, path: PathBuf },
    /// No frame pair arrived within the configured limit
    TimedOut { index: u32 },
}

enum Acquisition {
    Complete,
    TimedOut,
}

/// Everything a capture run needs: both streams, their capture buffers,
/// the writer, and the counters shared by the display loop
pub struct CaptureSession<S, W> {
    sources: StereoPair<S>,
    buffers: StereoPair<FrameBuffer>,
    writer: W,
    destination: PathBuf,
    width: u32,
    height: u32,
    capture_index: u32,
    done: bool,
    limit: AcquireLimit,
}

impl<S, W> CaptureSession<S, W>
where
    S: FrameSource,
    W: FrameWriter,
{
    /// Bind both streams and allocate their buffers
    ///
    /// Fails if the two streams report different resolutions.
    pub fn new(
        sources: StereoPair<S>,
        writer: W,
        destination: impl Into<PathBuf>,
        limit: AcquireLimit,
    ) -> Result<Self, CaptureError> {
        let (left_width, left_height) = sources.left.resolution();
        let (right_width, right_height) = sources.right.resolution();

        if (left_width, left_height) != (right_width, right_height) {
            return Err(CaptureError::DimensionMismatch {
                left_width,
                left_height,
                right_width,
                right_height,
            });
        }

        let (width, height) = (left_width, left_height);
        let buffers = StereoPair::new(
            FrameBuffer::new(width, height),
            FrameBuffer::new(width, height),
        );

        Ok(Self {
            sources,
            buffers,
            writer,
            destination: destination.into(),
            width,
            height,
            capture_index: 0,
            done: false,
            limit,
        })
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Ask the display loop to stop after its current iteration
    pub fn request_quit(&mut self) {
        self.done = true;
    }

    pub fn source_order(&self, side: Side) -> ChannelOrder {
        self.sources.get(side).channel_order()
    }

    /// Poll one stream for the live preview
    ///
    /// Independent of capture polling: a frame returned here is not kept.
    pub fn poll_preview(&mut self, side: Side) -> Result<Option<&[u8]>> {
        self.sources.get_mut(side).poll_frame()
    }

    /// Capture, convert and persist one synchronized frame pair
    ///
    /// Blocks until both streams have produced a frame (or the acquire limit
    /// expires). Source errors and malformed frames are returned as errors;
    /// writer failures are logged and end the session instead.
    pub fn trigger(&mut self) -> Result<CaptureOutcome> {
        self.capture_index += 1;
        let index = self.capture_index;

        tracing::info!("Capturing {:03}", index);

        if let Acquisition::TimedOut = self.acquire()? {
            if let AcquireLimit::Timeout(limit) = self.limit {
                tracing::error!("{}", CaptureError::AcquireTimeout { index, limit });
            }
            return Ok(CaptureOutcome::TimedOut { index });
        }
        tracing::debug!("Acquired frame pair {:03}", index);

        self.convert();
        tracing::debug!("Converted frame pair {:03}", index);

        self.persist(index)
    }

    fn acquire(&mut self) -> Result<Acquisition> {
        let started = Instant::now();
        let mut fresh = StereoPair::new(false, false);

        // Spins without sleeping; each side stops being polled once it has a frame
        while !(fresh.left && fresh.right) {
            for side in SIDES {
                if *fresh.get(side) {
                    continue;
                }
                if let Some(frame) = self.sources.get_mut(side).poll_frame()? {
                    self.buffers.get_mut(side).copy_from(side, frame)?;
                    *fresh.get_mut(side) = true;
                    tracing::trace!("Got {} frame after {:?}", side, started.elapsed());
                }
            }

            if let AcquireLimit::Timeout(limit) = self.limit {
                if !(fresh.left && fresh.right) && started.elapsed() >= limit {
                    return Ok(Acquisition::TimedOut);
                }
            }
        }

        Ok(Acquisition::Complete)
    }

    fn convert(&mut self) {
        let target = self.writer.channel_order();
        for side in SIDES {
            if self.sources.get(side).channel_order() != target {
                swap_red_blue(self.buffers.get_mut(side).as_bytes_mut(), self.width, self.height);
            }
        }
    }

    fn persist(&mut self, index: u32) -> Result<CaptureOutcome> {
        let extension = self.writer.extension();
        let mut written = StereoPair::<PathBuf>::default();

        for side in SIDES {
            let path = capture_path(&self.destination, index, side, extension);
            let buffer = self.buffers.get(side);

            if let Err(err) = self
                .writer
                .write_frame(&path, self.width, self.height, buffer.as_bytes())
            {
                tracing::error!("Could not save \"{}\": {:#}", path.display(), err);
                self.done = true;
                return Ok(CaptureOutcome::PersistFailed { index, path });
            }
            *written.get_mut(side) = path;
        }

        tracing::info!("Saved capture {:03}", index);

        Ok(CaptureOutcome::Saved {
            index,
            left: written.left,
            right: written.right,
        })
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self, side: Side) -> &FrameBuffer {
        self.buffers.get(side)
    }

    #[cfg(test)]
    pub(crate) fn source(&self, side: Side) -> &S {
        self.sources.get(side)
    }

    #[cfg(test)]
    pub(crate) fn writer(&self) -> &W {
        &self.writer
    }
}
