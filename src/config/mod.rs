// src/config/mod.rs
//! Configuration module: analysis parameters, theme and the TOML config file.

pub mod file;

pub use file::{AnalysisConfig, ChirpvizConfig, ThemeConfig};
