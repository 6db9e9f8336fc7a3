use std::path::PathBuf;

use thiserror::Error;

pub type ClockResult<T> = std::result::Result<T, ClockError>;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Surface(#[from] pixels::Error),
    #[error("failed to load font {path:?}: {reason}")]
    Font { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
