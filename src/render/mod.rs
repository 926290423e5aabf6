// src/render/mod.rs
//! Render module - the frame loop that feeds sample frames to a sink.

pub mod render_loop;
pub mod scheduler;
pub mod sink;

pub use render_loop::RenderLoop;
pub use scheduler::{FrameHandle, FrameScheduler, IntervalScheduler, FALLBACK_FRAME_RATE};
pub use sink::RenderSink;
