use std::time::Duration;

use crate::canvas::Canvas;
use crate::clock::{HandAngles, HandMotion, SystemClock, TimeSource};
use crate::font::{LabelFont, TextMeasure};
use crate::geometry::{FrameGeometry, Size};
use crate::paint::DrawingTools;
use crate::scene::{build_frame, Scene};
use crate::style::DialStyle;
use crate::timer::CancelToken;

/// Delay between the end of one frame and the next.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(1000);

/// What the view wants from the host after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Render again once this much time has passed.
    After(Duration),
}

/// Capabilities a host needs to lay out, paint and schedule a view.
pub trait View {
    fn measure(&self, available: Size) -> Size;
    fn render(&mut self, canvas: &mut Canvas) -> Redraw;
    /// Called when the view is shown. `token` cancels the host's redraw timer.
    fn on_attach(&mut self, token: CancelToken);
    fn on_detach(&mut self);
}

/// Analog clock face with hour labels and three hands.
pub struct ClockView {
    style: DialStyle,
    tools: DrawingTools,
    motion: HandMotion,
    clock: Box<dyn TimeSource>,
    font: Option<LabelFont>,
    attachment: Option<CancelToken>,
}

impl ClockView {
    pub fn new(style: DialStyle, motion: HandMotion, font: Option<LabelFont>) -> Self {
        if font.is_none() {
            tracing::warn!("no label font available; hour labels will not be drawn");
        }
        let tools = DrawingTools::from_style(&style);
        Self {
            style,
            tools,
            motion,
            clock: Box::new(SystemClock),
            font,
            attachment: None,
        }
    }

    pub fn with_time_source(mut self, clock: impl TimeSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Lays out the frame for `size` at the current time.
    pub fn frame(&self, size: Size) -> Scene {
        let geometry = FrameGeometry::new(size);
        let reading = self.clock.now();
        let angles = HandAngles::new(reading, self.motion);
        tracing::trace!(?reading, ?angles, ?size, "building clock frame");

        let labels = self.font.as_ref().map(|font| font as &dyn TextMeasure);
        build_frame(&geometry, &angles, &self.tools, &self.style, labels)
    }
}

impl View for ClockView {
    fn measure(&self, available: Size) -> Size {
        available
    }

    fn render(&mut self, canvas: &mut Canvas) -> Redraw {
        let scene = self.frame(canvas.size());
        scene.render(canvas, self.font.as_ref());
        Redraw::After(REDRAW_INTERVAL)
    }

    fn on_attach(&mut self, token: CancelToken) {
        tracing::debug!("clock view attached");
        if let Some(previous) = self.attachment.replace(token) {
            previous.cancel();
        }
    }

    fn on_detach(&mut self) {
        tracing::debug!("clock view detached");
        if let Some(token) = self.attachment.take() {
            token.cancel();
        }
    }
}
