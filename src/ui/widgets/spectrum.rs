// src/ui/widgets/spectrum.rs
//! Frequency bar rendering for the chart.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Group byte-scaled FFT bins into `num_bands` logarithmic bands in `0.0..=1.0`.
pub fn group_into_bands(bins: &[u8], num_bands: usize) -> Vec<f32> {
    let spectrum_size = bins.len();
    let mut bands = vec![0.0f32; num_bands];
    if spectrum_size == 0 {
        return bands;
    }

    // Use logarithmic spacing for frequency bands (more natural perception)
    for (i, band) in bands.iter_mut().enumerate() {
        let freq_start = (i as f32 / num_bands as f32).powf(2.5);
        let freq_end = ((i + 1) as f32 / num_bands as f32).powf(2.5);

        let bin_start = (freq_start * spectrum_size as f32) as usize;
        let bin_end = ((freq_end * spectrum_size as f32) as usize)
            .max(bin_start + 1)
            .min(spectrum_size);

        if bin_start < bin_end {
            let sum: u32 = bins[bin_start..bin_end].iter().map(|&b| u32::from(b)).sum();
            let count = (bin_end - bin_start) as f32;
            *band = sum as f32 / count / 255.0;
        }
    }

    bands
}

/// Renderer for spectrum visualization bars.
pub struct SpectrumRenderer {
    /// Bar width in characters
    bar_width: usize,
    /// Gap between bars
    bar_gap: usize,
    /// Block characters for smooth gradation
    chars: [char; 10],
}

impl SpectrumRenderer {
    pub fn new() -> Self {
        Self {
            bar_width: 2,
            bar_gap: 1,
            chars: ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█', '█', '█'],
        }
    }

    /// Render byte frequency bins as bars, optionally mirrored around the centre.
    pub fn render(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        bins: &[u8],
        color: Color,
        border: Color,
        mirrored: bool,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("Spectrum");
        let inner = block.inner(area);

        if inner.height >= 1 && inner.width >= 2 {
            let content = self.build_bars(inner, bins, mirrored);
            let paragraph = Paragraph::new(content).style(Style::default().fg(color));
            f.render_widget(paragraph, inner);
        }

        f.render_widget(block, area);
    }

    /// Build the bar picture line by line from top to bottom.
    fn build_bars(&self, area: Rect, bins: &[u8], mirrored: bool) -> String {
        let width = area.width as usize;
        let height = area.height as usize;
        let bar_spacing = self.bar_width + self.bar_gap;
        let usable = if mirrored { width / 2 } else { width };
        let num_bars = (usable / bar_spacing).max(1);
        let magnitudes = group_into_bands(bins, num_bars);

        // Define 10 segments with different characters for smooth gradation
        const SEGMENTS: usize = 10;

        let mut full_content = String::new();
        for row in 0..height {
            let mut line = String::with_capacity(width);

            if mirrored {
                // Left side, lowest band in the middle
                for i in (0..num_bars).rev() {
                    let ch = self.get_char_for_row(magnitudes[i], row, height, SEGMENTS);
                    line.extend(std::iter::repeat_n(ch, self.bar_width));
                    if i > 0 {
                        line.extend(std::iter::repeat_n(' ', self.bar_gap));
                    }
                }
                for &magnitude in &magnitudes {
                    line.extend(std::iter::repeat_n(' ', self.bar_gap));
                    let ch = self.get_char_for_row(magnitude, row, height, SEGMENTS);
                    line.extend(std::iter::repeat_n(ch, self.bar_width));
                }
            } else {
                for &magnitude in &magnitudes {
                    let ch = self.get_char_for_row(magnitude, row, height, SEGMENTS);
                    line.extend(std::iter::repeat_n(ch, self.bar_width));
                    line.extend(std::iter::repeat_n(' ', self.bar_gap));
                }
            }

            // Pad or truncate to the available width (respect UTF-8 boundaries)
            let char_count = line.chars().count();
            if char_count < width {
                line.extend(std::iter::repeat_n(' ', width - char_count));
            } else if char_count > width {
                line = line.chars().take(width).collect();
            }

            full_content.push_str(&line);
            if row < height - 1 {
                full_content.push('\n');
            }
        }

        full_content
    }

    /// Determine what character to show at a specific row for a given magnitude.
    fn get_char_for_row(&self, magnitude: f32, row: usize, height: usize, segments: usize) -> char {
        let pixels_filled = (magnitude * height as f32) as usize;

        // Current row from bottom (0 = bottom, height-1 = top)
        let row_from_bottom = height - row - 1;

        if pixels_filled == 0 && row_from_bottom == 0 {
            // Always show minimum bar at bottom row
            '▁'
        } else if row_from_bottom < pixels_filled {
            let segment_idx = ((magnitude * segments as f32) as usize).min(segments - 1);

            if row_from_bottom == pixels_filled - 1 {
                // Top segment - use gradient character
                let fractional = (magnitude * height as f32) - pixels_filled as f32;
                if fractional > 0.5 {
                    self.chars[segment_idx]
                } else {
                    self.chars[segment_idx.saturating_sub(1)]
                }
            } else {
                '█'
            }
        } else {
            ' '
        }
    }
}

impl Default for SpectrumRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_normalised() {
        let bins = vec![255u8; 256];
        let bands = group_into_bands(&bins, 16);
        assert_eq!(bands.len(), 16);
        assert!(bands.iter().all(|&b| (b - 1.0).abs() < 1e-6));
    }

    #[test]
    fn silence_gives_empty_bands() {
        let bands = group_into_bands(&[0u8; 128], 8);
        assert!(bands.iter().all(|&b| b == 0.0));
        assert_eq!(group_into_bands(&[], 4), vec![0.0; 4]);
    }

    #[test]
    fn low_bins_land_in_first_band() {
        let mut bins = vec![0u8; 256];
        bins[0] = 255;
        let bands = group_into_bands(&bins, 8);
        assert!(bands[0] > 0.0);
        assert!(bands[1..].iter().all(|&b| b == 0.0));
    }

    #[test]
    fn lines_fill_the_area_exactly() {
        let renderer = SpectrumRenderer::new();
        let area = Rect::new(0, 0, 31, 4);
        for mirrored in [true, false] {
            let content = renderer.build_bars(area, &[128u8; 64], mirrored);
            let lines: Vec<&str> = content.split('\n').collect();
            assert_eq!(lines.len(), 4);
            assert!(lines.iter().all(|l| l.chars().count() == 31));
        }
    }
}
