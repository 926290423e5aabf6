// src/audio/mod.rs
//! Audio module - playback, the sample tap, and the capture pipeline.

pub mod analyser;
pub mod capture;
pub mod player;
pub mod sample_capture;

// Re-export commonly used types
pub use analyser::Analyser;
pub use capture::{AudioElement, Capture, SampleFrame};
pub use player::MusicPlayer;
pub use sample_capture::{SampleBuffer, SampleCapture};
