// src/audio/capture.rs
//! Capture pipeline: binds an audio element's sample tap to an analyser.

use ringbuf::traits::*;

use super::analyser::Analyser;
use super::sample_capture::SampleBuffer;
use crate::config::AnalysisConfig;
use crate::error::CaptureError;

/// Something that plays audio and can expose what it plays.
pub trait AudioElement {
    /// The element's sample tap, or `None` when the host has no audio graph.
    fn tap(&self) -> Option<SampleBuffer>;
}

/// One frame of analysis output. Both arrays hold `window_size / 2` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFrame {
    pub frequencies: Vec<u8>,
    pub time_domain: Vec<u8>,
}

impl SampleFrame {
    /// A zero-filled frame of `len` bins.
    pub fn zeroed(len: usize) -> Self {
        Self {
            frequencies: vec![0; len],
            time_domain: vec![0; len],
        }
    }
}

/// Live analysis of an element's output.
pub struct Capture {
    tap: SampleBuffer,
    analyser: Analyser,
    /// The most recent window, oldest sample first
    window: Vec<f32>,
    /// Whether any audio has reached the tap yet
    heard_audio: bool,
}

impl Capture {
    /// Tap `element` and build an analyser for it.
    ///
    /// # Errors
    /// - `InvalidConfig` if the analysis parameters are out of range
    /// - `UnsupportedPlatform` if the element has no audio graph to tap
    pub fn create(element: &impl AudioElement, config: AnalysisConfig) -> Result<Self, CaptureError> {
        config.validate()?;

        let tap = element.tap().ok_or(CaptureError::UnsupportedPlatform)?;
        let analyser = Analyser::new(&config);
        tracing::debug!(
            "Capture created: window {} samples, smoothing {}",
            config.window_size,
            config.smoothing
        );

        Ok(Self {
            tap,
            analyser,
            window: vec![0.0; config.window_size],
            heard_audio: false,
        })
    }

    /// Read the current frequency and time-domain data.
    ///
    /// New samples are drained from the tap and shifted into the window.
    /// Before any audio has reached the tap both arrays are all zeros; once
    /// audio has played, a frame with nothing new analyses silence.
    pub fn sample(&mut self) -> SampleFrame {
        let bins = self.analyser.bin_count();

        let fresh = match self.tap.lock() {
            Ok(mut buf) => {
                let fresh = buf.occupied_len();
                if fresh > 0 {
                    let n = self.window.len();
                    // Only the newest window's worth of samples matters
                    buf.skip(fresh.saturating_sub(n));
                    let take = fresh.min(n);
                    self.window.copy_within(take.., 0);
                    buf.pop_slice(&mut self.window[n - take..]);
                }
                fresh
            }
            Err(_) => 0,
        };

        if fresh > 0 {
            self.heard_audio = true;
        } else if self.heard_audio {
            // Paused or stopped element: the analyser hears silence
            self.window.fill(0.0);
        } else {
            return SampleFrame::zeroed(bins);
        }

        let mut frame = SampleFrame::zeroed(bins);
        self.analyser
            .byte_frequency_data(&self.window, &mut frame.frequencies);
        Analyser::byte_time_domain_data(&self.window, &mut frame.time_domain);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::sample_capture::{new_sample_buffer, SampleCapture};
    use rodio::source::SineWave;

    struct TestElement(Option<SampleBuffer>);

    impl AudioElement for TestElement {
        fn tap(&self) -> Option<SampleBuffer> {
            self.0.clone()
        }
    }

    fn config(window_size: usize) -> AnalysisConfig {
        AnalysisConfig {
            window_size,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn missing_audio_graph_is_unsupported() {
        let result = Capture::create(&TestElement(None), AnalysisConfig::default());
        assert!(matches!(result, Err(CaptureError::UnsupportedPlatform)));
    }

    #[test]
    fn invalid_config_is_reported_before_tapping() {
        let element = TestElement(None);
        let result = Capture::create(&element, config(100));
        assert!(matches!(result, Err(CaptureError::InvalidConfig(_))));
    }

    #[test]
    fn frame_lengths_follow_window_size() {
        let mut window_size = 32;
        while window_size <= 2048 {
            let tap = new_sample_buffer();
            let mut capture = Capture::create(&TestElement(Some(tap.clone())), config(window_size)).unwrap();

            let silent = capture.sample();
            assert_eq!(silent.frequencies.len(), window_size / 2);
            assert_eq!(silent.time_domain.len(), window_size / 2);

            let _ = SampleCapture::new(SineWave::new(440.0), tap).take(300).count();
            let playing = capture.sample();
            assert_eq!(playing.frequencies.len(), window_size / 2);
            assert_eq!(playing.time_domain.len(), window_size / 2);

            window_size *= 2;
        }
    }

    #[test]
    fn sampling_before_playback_is_all_zero_and_repeatable() {
        let mut capture =
            Capture::create(&TestElement(Some(new_sample_buffer())), AnalysisConfig::default()).unwrap();

        for _ in 0..3 {
            let frame = capture.sample();
            assert_eq!(frame, SampleFrame::zeroed(256));
        }
    }

    #[test]
    fn halted_playback_decays_to_silence() {
        let tap = new_sample_buffer();
        let mut capture = Capture::create(&TestElement(Some(tap.clone())), config(512)).unwrap();
        let _ = SampleCapture::new(SineWave::new(1000.0), tap.clone()).take(4096).count();

        let playing = capture.sample();
        assert!(playing.frequencies.iter().any(|&b| b > 0));
        assert_eq!(tap.lock().unwrap().occupied_len(), 0);

        let mut last = playing;
        for _ in 0..100 {
            last = capture.sample();
        }
        assert_eq!(last.frequencies.iter().copied().max(), Some(0));
        assert!(last.time_domain.iter().all(|&b| b == 128));
    }

    #[test]
    fn new_samples_shift_into_window() {
        let tap = new_sample_buffer();
        let mut capture = Capture::create(&TestElement(Some(tap.clone())), config(32)).unwrap();
        let push = |samples: &[f32]| {
            let mut buf = tap.lock().unwrap();
            for &s in samples {
                let _ = buf.try_push(s);
            }
        };

        push(&[0.5; 8]);
        let first = capture.sample();
        // Time domain shows the older half of the window, still silent
        assert!(first.time_domain.iter().all(|&b| b == 128));

        push(&[0.5; 16]);
        let second = capture.sample();
        assert_eq!(second.time_domain[..8], [128; 8]);
        assert!(second.time_domain[8..].iter().all(|&b| b == 192));
    }

    #[test]
    fn tone_shows_up_in_both_domains() {
        let tap = new_sample_buffer();
        let mut capture = Capture::create(&TestElement(Some(tap.clone())), config(1024)).unwrap();
        let _ = SampleCapture::new(SineWave::new(1500.0), tap).take(4096).count();

        let frame = capture.sample();
        assert!(frame.frequencies.iter().any(|&b| b > 0));
        assert!(frame.time_domain.iter().any(|&b| b > 200));
        assert!(frame.time_domain.iter().any(|&b| b < 56));
    }
}
