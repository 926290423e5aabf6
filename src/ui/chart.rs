// src/ui/chart.rs
//! Terminal chart that implements the render sink.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use ratatui::{
    backend::Backend,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Terminal,
};

use super::layout::{compute_layout, PanelVisibility};
use super::widgets::{render_waveform, SpectrumRenderer};
use crate::audio::SampleFrame;
use crate::config::ThemeConfig;
use crate::error::SinkError;
use crate::render::RenderSink;

/// Resolved chart colours, fixed when the chart is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub frequency: Color,
    pub waveform: Color,
    pub border: Color,
    pub mirrored: bool,
}

impl Theme {
    /// Resolve colour names from the config.
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        Ok(Self {
            frequency: parse_color(&config.frequency_color)?,
            waveform: parse_color(&config.waveform_color)?,
            border: parse_color(&config.border_color)?,
            mirrored: config.mirrored,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            frequency: Color::White,
            waveform: Color::Cyan,
            border: Color::Gray,
            mirrored: true,
        }
    }
}

fn parse_color(name: &str) -> Result<Color> {
    Color::from_str(name).map_err(|_| anyhow!("unknown colour '{name}'"))
}

/// The chart's series plus its theme.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub frequencies: Vec<u8>,
    pub time_domain: Vec<u8>,
    pub theme: Theme,
}

impl RenderState {
    pub fn new(theme: Theme) -> Self {
        Self {
            frequencies: Vec::new(),
            time_domain: Vec::new(),
            theme,
        }
    }
}

/// Draws the latest frame to a ratatui terminal.
pub struct ChartSink<B: Backend> {
    terminal: Terminal<B>,
    state: RenderState,
    renderer: SpectrumRenderer,
    visibility: PanelVisibility,
    /// Text shown in the status line
    status: String,
}

impl<B: Backend> ChartSink<B> {
    pub fn new(terminal: Terminal<B>, theme: Theme) -> Self {
        Self {
            terminal,
            state: RenderState::new(theme),
            renderer: SpectrumRenderer::new(),
            visibility: PanelVisibility::default(),
            status: String::new(),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Toggle a panel by number (1 = spectrum, 2 = waveform).
    pub fn toggle_panel(&mut self, panel: usize) {
        self.visibility.toggle(panel);
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> RenderSink for ChartSink<B> {
    fn update(&mut self, frame: SampleFrame) -> Result<(), SinkError> {
        self.state.frequencies = frame.frequencies;
        self.state.time_domain = frame.time_domain;
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), SinkError> {
        let state = &self.state;
        let renderer = &self.renderer;
        let visibility = &self.visibility;
        let status = &self.status;

        self.terminal.draw(|f| {
            let layout = compute_layout(f.area(), visibility);
            let theme = state.theme;

            f.render_widget(
                Paragraph::new(status.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
                layout.status,
            );
            if let Some(area) = layout.spectrum {
                renderer.render(
                    f,
                    area,
                    &state.frequencies,
                    theme.frequency,
                    theme.border,
                    theme.mirrored,
                );
            }
            if let Some(area) = layout.waveform {
                render_waveform(f, area, &state.time_domain, theme.waveform, theme.border);
            }
        })?;
        Ok(())
    }
}
