// src/ui/widgets/mod.rs
//! Chart widgets for the visualizer.

pub mod spectrum;
pub mod waveform;

pub use spectrum::SpectrumRenderer;
pub use waveform::render_waveform;
