// src/audio/sample_capture.rs
//! A wrapper source that taps audio samples into a circular buffer for analysis.

use std::sync::{Arc, Mutex};

use ringbuf::{traits::*, HeapRb};
use rodio::Source;

/// Shared circular buffer of recent mono samples, written by the playback thread.
pub type SampleBuffer = Arc<Mutex<HeapRb<f32>>>;

/// Capacity of a tap buffer; large enough for the biggest analysis window.
pub const TAP_CAPACITY: usize = 32768;

/// Create an empty tap buffer.
pub fn new_sample_buffer() -> SampleBuffer {
    Arc::new(Mutex::new(HeapRb::<f32>::new(TAP_CAPACITY)))
}

/// A wrapper source that downmixes samples to mono into a circular buffer while
/// passing the original interleaved samples through untouched.
pub struct SampleCapture<S> {
    source: S,
    buffer: SampleBuffer,
    /// Channel count of the frame currently being accumulated
    channels: u16,
    /// Position within the current interleaved frame
    channel_index: u16,
    /// Running sum of the current frame's channels
    frame_sum: f32,
}

impl<S> SampleCapture<S>
where
    S: Source<Item = f32>,
{
    /// Create a new sample capture wrapper around an existing source.
    pub fn new(source: S, buffer: SampleBuffer) -> Self {
        let channels = source.channels().max(1);
        Self {
            source,
            buffer,
            channels,
            channel_index: 0,
            frame_sum: 0.0,
        }
    }

    fn push_mono(&self, sample: f32) {
        // Push sample to circular buffer (overwrites oldest if full)
        if let Ok(mut buf) = self.buffer.lock() {
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(sample);
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        // Channel layout can change at a frame boundary of the inner source
        if self.channel_index == 0 {
            self.channels = self.source.channels().max(1);
        }

        let sample = self.source.next()?;
        self.frame_sum += sample;
        self.channel_index += 1;

        if self.channel_index >= self.channels {
            let mono = self.frame_sum / f32::from(self.channels);
            self.push_mono(mono);
            self.channel_index = 0;
            self.frame_sum = 0.0;
        }

        Some(sample)
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.source.total_duration()
    }
}
