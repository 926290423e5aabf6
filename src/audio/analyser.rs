// src/audio/analyser.rs
//! Windowed FFT analysis producing byte-scaled frequency and time-domain data.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::config::AnalysisConfig;

/// Blackman window coefficient.
const BLACKMAN_ALPHA: f32 = 0.16;

/// Analysis node: inspects a window of samples and exposes byte snapshots of
/// its spectrum and waveform without touching the signal itself.
pub struct Analyser {
    /// Planned forward FFT for `window_size` points
    fft: Arc<dyn Fft<f32>>,
    window_size: usize,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
    /// Precomputed Blackman window coefficients
    window: Vec<f32>,
    /// Smoothed linear magnitudes carried between frames
    smoothed: Vec<f32>,
    /// Scratch buffer reused across FFT runs
    scratch: Vec<Complex<f32>>,
}

impl Analyser {
    /// Build an analyser for an already validated config.
    pub fn new(config: &AnalysisConfig) -> Self {
        let n = config.window_size;
        let fft = FftPlanner::new().plan_fft_forward(n);
        let window = (0..n)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
                let a0 = 0.5 * (1.0 - BLACKMAN_ALPHA);
                let a2 = 0.5 * BLACKMAN_ALPHA;
                a0 - 0.5 * phase.cos() + a2 * (2.0 * phase).cos()
            })
            .collect();

        Self {
            fft,
            window_size: n,
            smoothing: config.smoothing,
            min_db: config.min_decibels,
            max_db: config.max_decibels,
            window,
            smoothed: vec![0.0; n / 2],
            scratch: vec![Complex::new(0.0, 0.0); n],
        }
    }

    /// Number of frequency bins (half the window size).
    pub fn bin_count(&self) -> usize {
        self.window_size / 2
    }

    /// Run the FFT over `samples` (exactly `window_size` long) and write the
    /// smoothed byte magnitudes into `out`.
    pub fn byte_frequency_data(&mut self, samples: &[f32], out: &mut [u8]) {
        debug_assert_eq!(samples.len(), self.window_size);

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let scale = 1.0 / self.window_size as f32;
        let db_range = self.max_db - self.min_db;

        for (k, (smoothed, byte)) in self.smoothed.iter_mut().zip(out.iter_mut()).enumerate() {
            let magnitude = self.scratch[k].norm() * scale;
            let value = self.smoothing * *smoothed + (1.0 - self.smoothing) * magnitude;
            // Keep NaN/inf out of the carried state
            *smoothed = if value.is_finite() { value } else { 0.0 };

            let db = 20.0 * smoothed.max(1e-20).log10();
            let scaled = (255.0 / db_range * (db - self.min_db)).floor();
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }
    }

    /// Convert the leading samples of the window into centred bytes.
    pub fn byte_time_domain_data(samples: &[f32], out: &mut [u8]) {
        for (byte, &sample) in out.iter_mut().zip(samples) {
            let scaled = (128.0 * (1.0 + sample)).floor();
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }
    }
}
