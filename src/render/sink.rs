// src/render/sink.rs
//! The consumer side of the render loop.

use crate::audio::SampleFrame;
use crate::error::SinkError;

/// A chart-like component that displays sample frames.
pub trait RenderSink {
    /// Replace the displayed series with `frame`.
    fn update(&mut self, frame: SampleFrame) -> Result<(), SinkError>;

    /// Repaint with the current series.
    fn redraw(&mut self) -> Result<(), SinkError>;
}
