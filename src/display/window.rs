use super::{DisplaySurface, UiEvent};
use crate::frame::{frame_len, ChannelOrder, Side};
use anyhow::{anyhow, Result};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

/// Side-by-side live preview of both streams
pub struct PreviewWindow {
    window: Window,
    canvas: Canvas,
    size: (usize, usize),
}

impl PreviewWindow {
    /// Open a window holding two `half_width` x `height` previews
    pub fn new(title: &str, half_width: usize, height: usize) -> Result<Self> {
        let width = half_width * 2;
        tracing::info!("Opening preview window {}x{}", width, height);

        let options = WindowOptions {
            resize: true,
            ..WindowOptions::default()
        };
        let window = Window::new(title, width, height, options)
            .map_err(|e| anyhow!("Could not create window: {}", e))?;
        let size = window.get_size();

        Ok(Self {
            window,
            canvas: Canvas::new(width, height),
            size,
        })
    }
}

impl DisplaySurface for PreviewWindow {
    fn drain_events(&mut self) -> Vec<UiEvent> {
        if !self.window.is_open() {
            return vec![UiEvent::Close];
        }

        let mut events = Vec::new();

        let size = self.window.get_size();
        if size != self.size {
            self.size = size;
            events.push(UiEvent::Repaint);
        }

        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            events.push(match key {
                Key::Space => UiEvent::Capture,
                Key::Escape => UiEvent::Quit,
                other => UiEvent::Other(format!("{:?}", other)),
            });
        }

        events
    }

    fn default_event(&mut self, event: &UiEvent) {
        tracing::trace!("Ignoring {:?}", event);
    }

    fn blit(&mut self, side: Side, width: u32, height: u32, order: ChannelOrder, pixels: &[u8]) {
        let half = self.canvas.width / 2;
        let x0 = match side {
            Side::Left => 0,
            Side::Right => half,
        };
        self.canvas
            .stretch(x0, half, pixels, width as usize, height as usize, order);
    }

    fn present(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.canvas.pixels, self.canvas.width, self.canvas.height)
            .map_err(|e| anyhow!("Could not update window: {}", e))
    }
}

/// 0RGB pixel grid handed to the window
struct Canvas {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    /// Nearest-neighbour scale a packed 3-channel frame into the columns
    /// `x0..x0 + region_width`, covering the full canvas height
    fn stretch(
        &mut self,
        x0: usize,
        region_width: usize,
        frame: &[u8],
        frame_width: usize,
        frame_height: usize,
        order: ChannelOrder,
    ) {
        if frame_width == 0 || frame_height == 0 || region_width == 0 {
            return;
        }
        let expected = frame_len(frame_width as u32, frame_height as u32);
        if frame.len() < expected {
            tracing::warn!(
                "Skipping preview of a {} byte frame, expected {}",
                frame.len(),
                expected
            );
            return;
        }

        for dy in 0..self.height {
            let sy = dy * frame_height / self.height;
            let row = &mut self.pixels[dy * self.width + x0..dy * self.width + x0 + region_width];

            for (dx, out) in row.iter_mut().enumerate() {
                let sx = dx * frame_width / region_width;
                let i = (sy * frame_width + sx) * 3;
                let (r, g, b) = match order {
                    ChannelOrder::Rgb => (frame[i], frame[i + 1], frame[i + 2]),
                    ChannelOrder::Bgr => (frame[i + 2], frame[i + 1], frame[i]),
                };
                *out = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
            }
        }
    }
}
