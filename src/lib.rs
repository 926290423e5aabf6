// src/lib.rs
//! Chirpviz - a terminal audio visualizer.
//!
//! Plays an audio file, taps the playing signal into an FFT analyser and
//! renders frequency bars and an oscilloscope line once per frame.

pub mod audio;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod ui;

pub use error::{CaptureError, SinkError};
