// src/ui/layout.rs
//! Layout computation for the chart panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Which chart panels are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub spectrum: bool,
    pub waveform: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            spectrum: true,
            waveform: true,
        }
    }
}

impl PanelVisibility {
    /// Toggle a panel by number (1 = spectrum, 2 = waveform).
    pub fn toggle(&mut self, panel: usize) {
        match panel {
            1 => self.spectrum = !self.spectrum,
            2 => self.waveform = !self.waveform,
            _ => {}
        }
    }
}

/// Computed layout areas for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedLayout {
    /// One-line status bar at the top
    pub status: Rect,
    pub spectrum: Option<Rect>,
    pub waveform: Option<Rect>,
}

/// Split `area` into a status line and the visible panels stacked vertically.
pub fn compute_layout(area: Rect, visibility: &PanelVisibility) -> ComputedLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let status = rows[0];
    let body = rows[1];

    let (spectrum, waveform) = match (visibility.spectrum, visibility.waveform) {
        (true, true) => {
            let panels = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(body);
            (Some(panels[0]), Some(panels[1]))
        }
        (true, false) => (Some(body), None),
        (false, true) => (None, Some(body)),
        (false, false) => (None, None),
    };

    ComputedLayout {
        status,
        spectrum,
        waveform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_panels_get_no_area() {
        let area = Rect::new(0, 0, 80, 24);
        let mut visibility = PanelVisibility::default();
        visibility.toggle(2);

        let layout = compute_layout(area, &visibility);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.spectrum, Some(Rect::new(0, 1, 80, 23)));
        assert_eq!(layout.waveform, None);
    }

    #[test]
    fn both_panels_split_the_body() {
        let layout = compute_layout(Rect::new(0, 0, 80, 21), &PanelVisibility::default());
        let spectrum = layout.spectrum.unwrap();
        let waveform = layout.waveform.unwrap();
        assert_eq!(spectrum.height + waveform.height, 20);
        assert!(spectrum.height > waveform.height);
    }
}
