// src/ui/widgets/waveform.rs
//! Oscilloscope line for the time-domain series.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Map time-domain bytes to chart points `(index, level)`.
pub fn waveform_points(samples: &[u8]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64, f64::from(s)))
        .collect()
}

/// Render the time-domain series as a braille line chart.
pub fn render_waveform(f: &mut Frame<'_>, area: Rect, samples: &[u8], color: Color, border: Color) {
    let points = waveform_points(samples);
    let x_max = samples.len().saturating_sub(1).max(1) as f64;

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title("Waveform"),
        )
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds([0.0, 255.0]));

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_sample_order() {
        let points = waveform_points(&[128, 255, 0]);
        assert_eq!(points, vec![(0.0, 128.0), (1.0, 255.0), (2.0, 0.0)]);
    }
}
