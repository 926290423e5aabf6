// src/ui/mod.rs
//! UI module - the terminal chart sink, input handling and session loop.

pub mod chart;
pub mod keybindings;
pub mod layout;
pub mod tui;
pub mod widgets;

// Re-export main entry point
pub use chart::{ChartSink, RenderState, Theme};
pub use tui::run;
