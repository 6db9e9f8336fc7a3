//! Analog clock face rendered in software onto a pixel buffer.
//!
//! [`ClockView`] builds a [`Scene`] for the current bounds and wall-clock time
//! and rasterizes it onto a [`Canvas`]. [`host::run_window`] shows any
//! [`View`] in a native window and redraws it once per second.

pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod style;
pub mod timer;
pub mod view;

pub use canvas::Canvas;
pub use clock::{ClockReading, HandAngles, HandMotion, SystemClock, TimeSource};
pub use config::ClockConfig;
pub use error::{ClockError, ClockResult};
pub use geometry::{FrameGeometry, Size};
pub use scene::{build_frame, DrawCommand, Scene};
pub use style::{Color, DialStyle, Hand};
pub use view::{ClockView, Redraw, View};

use font::LabelFont;

/// Loads the user configuration and shows the clock until its window closes.
pub fn run() -> ClockResult<()> {
    logging::init();
    tracing::info!("starting clockface");

    let config = config::load_clock_config();
    let style = config.dial_style();
    let font = LabelFont::discover(config.font_path.as_deref())?;

    let view = ClockView::new(style, config.hand_motion, font);
    host::run_window(view, &config.window)
}
