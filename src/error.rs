// src/error.rs
//! Error types shared by the capture pipeline and the render loop.

use thiserror::Error;

/// Errors raised while setting up a [`Capture`](crate::audio::Capture).
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The host has no audio graph to tap (no output device could be opened).
    #[error("audio graph is not available on this platform")]
    UnsupportedPlatform,
    /// The analysis parameters are out of range.
    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),
}

/// Errors a [`RenderSink`](crate::render::RenderSink) may return from `update` or `redraw`.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink rejected frame: {0}")]
    Rejected(String),
}
