// ============================================================================
// WINDOW HOST
// ============================================================================

use std::time::Instant;

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::canvas::Canvas;
use crate::config::WindowConfig;
use crate::error::ClockResult;
use crate::geometry::Size;
use crate::style::Color;
use crate::timer::{CancelToken, FrameTimer};
use crate::view::{Redraw, View, REDRAW_INTERVAL};

const BACKGROUND: Color = Color::WHITE;

/// Shows `view` in its own window until the window is closed.
///
/// The host owns the redraw timer. The view receives its cancel token on
/// attach and cancels it on detach.
pub fn run_window<V: View>(mut view: V, window_config: &WindowConfig) -> ClockResult<()> {
    let requested = view.measure(Size::new(window_config.width, window_config.height));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&window_config.title)
        .with_inner_size(LogicalSize::new(
            requested.width as f64,
            requested.height as f64,
        ))
        .build(&event_loop)?;

    let window = std::sync::Arc::new(window);

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let token = CancelToken::new();
    let mut timer = FrameTimer::new(REDRAW_INTERVAL, token.clone());
    view.on_attach(token);
    tracing::info!(width = fb_width, height = fb_height, "clock window opened");

    let window_clone = window.clone();
    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    view.on_detach();
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    match pixels.resize_buffer(new_size.width, new_size.height) {
                        Ok(()) => {
                            fb_width = new_size.width as usize;
                            fb_height = new_size.height as usize;
                        }
                        Err(err) => {
                            tracing::warn!(
                                %err,
                                fb_width,
                                fb_height,
                                "failed to resize frame buffer; keeping the old size"
                            );
                        }
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        tracing::warn!(%err, "failed to resize surface");
                    }
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let redraw = {
                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        canvas.clear(BACKGROUND);
                        view.render(&mut canvas)
                    };
                    if let Err(err) = pixels.render() {
                        tracing::error!(%err, "failed to present frame");
                        view.on_detach();
                        window_target.exit();
                        return;
                    }

                    let Redraw::After(delay) = redraw;
                    timer.set_interval(delay);
                    timer.arm(Instant::now());
                }
                _ => {}
            },
            Event::AboutToWait => {
                if timer.fire(Instant::now()) {
                    window_clone.request_redraw();
                }
            }
            _ => {}
        }

        match timer.deadline() {
            Some(deadline) => window_target.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => window_target.set_control_flow(ControlFlow::Wait),
        }
    })?;

    tracing::info!("clock window closed");
    Ok(())
}
