mod window;

pub use window::PreviewWindow;

use crate::capture::FrameSource;
use crate::frame::{ChannelOrder, Side};
use crate::output::FrameWriter;
use crate::sequencer::CaptureSession;
use anyhow::Result;

/// Input delivered by the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The surface needs redrawing
    Repaint,
    /// The operator asked for a capture
    Capture,
    /// The operator asked to quit
    Quit,
    /// The window was closed
    Close,
    /// Anything else, named by the surface
    Other(String),
}

/// Trait for the live preview surface
pub trait DisplaySurface {
    /// Take all pending events without waiting
    fn drain_events(&mut self) -> Vec<UiEvent>;

    /// Handle an event the capture loop does not care about
    fn default_event(&mut self, _event: &UiEvent) {}

    /// Stretch a frame into the half of the surface belonging to `side`
    fn blit(&mut self, side: Side, width: u32, height: u32, order: ChannelOrder, pixels: &[u8]);

    /// Show everything blitted since the last call
    fn present(&mut self) -> Result<()>;
}

/// Run the preview until a quit request or a failed capture
///
/// Captures run synchronously on this loop, so the preview freezes while a
/// trigger waits for its frame pair.
pub fn run_display_loop<S, W, D>(session: &mut CaptureSession<S, W>, surface: &mut D) -> Result<()>
where
    S: FrameSource,
    W: FrameWriter,
    D: DisplaySurface,
{
    tracing::info!("Press SPACE to capture or ESCAPE to quit");

    while !session.is_done() {
        for event in surface.drain_events() {
            handle_event(session, surface, event)?;
            if session.is_done() {
                break;
            }
        }

        let (width, height) = session.resolution();
        for side in [Side::Left, Side::Right] {
            let order = session.source_order(side);
            if let Some(frame) = session.poll_preview(side)? {
                surface.blit(side, width, height, order, frame);
            }
        }

        surface.present()?;
    }

    tracing::info!("Capture session finished");
    Ok(())
}

/// Route one surface event to the capture session
fn handle_event<S, W, D>(session: &mut CaptureSession<S, W>, surface: &mut D, event: UiEvent) -> Result<()>
where
    S: FrameSource,
    W: FrameWriter,
    D: DisplaySurface,
{
    match &event {
        UiEvent::Repaint => {}
        UiEvent::Capture => {
            session.trigger()?;
        }
        UiEvent::Quit | UiEvent::Close => {
            tracing::debug!("{:?} requested", event);
            session.request_quit();
        }
        other => surface.default_event(other),
    }
    Ok(())
}
