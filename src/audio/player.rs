// src/audio/player.rs
//! Music playback engine using rodio, tapping its output for analysis.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ringbuf::traits::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::capture::AudioElement;
use super::sample_capture::{new_sample_buffer, SampleBuffer, SampleCapture};

/// How often the audio thread checks for a finished track while idle.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
}

/// Player that can `play()`, `pause()`, `resume()`, or `stop()` a file,
/// stopping any prior playback. Every played source is routed through a
/// [`SampleCapture`] so its output can be analysed.
pub struct MusicPlayer {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<PlayerCommand>,
    /// Local flags mirrored from the audio thread for quick UI access
    is_playing_flag: Arc<AtomicBool>,
    is_paused_flag: Arc<AtomicBool>,
    /// Whether the audio thread managed to open an output stream
    has_output: bool,
    /// Shared circular buffer containing recent mono samples
    sample_buffer: SampleBuffer,
}

impl MusicPlayer {
    /// Create an idle player, opening the default output device on a
    /// background thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<bool>();

        let is_playing_flag = Arc::new(AtomicBool::new(false));
        let is_paused_flag = Arc::new(AtomicBool::new(false));
        let sample_buffer = new_sample_buffer();

        let ap = is_playing_flag.clone();
        let az = is_paused_flag.clone();
        let sample_buf_clone = sample_buffer.clone();

        // Spawn audio thread which owns the OutputStream and handles play/pause/stop
        thread::spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => {
                    let _ = ready_tx.send(true);
                    pair
                }
                Err(e) => {
                    tracing::error!("Failed to open audio output: {}", e);
                    let _ = ready_tx.send(false);
                    // Drain commands until the sender is dropped
                    while rx.recv().is_ok() {}
                    return;
                }
            };

            let mut sink: Option<Sink> = None;

            loop {
                let cmd = match rx.recv_timeout(IDLE_POLL) {
                    Ok(cmd) => Some(cmd),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                match cmd {
                    None => {}
                    Some(PlayerCommand::Play(path)) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }

                        // Clear the tap when starting a new track
                        if let Ok(mut buf) = sample_buf_clone.lock() {
                            buf.clear();
                        }

                        match open_track(&path, &handle, &sample_buf_clone) {
                            Ok(new_sink) => {
                                tracing::info!("Playing {}", path.display());
                                ap.store(true, Ordering::SeqCst);
                                az.store(false, Ordering::SeqCst);
                                sink = Some(new_sink);
                            }
                            Err(e) => {
                                tracing::error!("Cannot play {}: {:#}", path.display(), e);
                                ap.store(false, Ordering::SeqCst);
                            }
                        }
                    }
                    Some(PlayerCommand::Pause) => {
                        if let Some(s) = &sink {
                            s.pause();
                            az.store(true, Ordering::SeqCst);
                        }
                    }
                    Some(PlayerCommand::Resume) => {
                        if let Some(s) = &sink {
                            s.play();
                            az.store(false, Ordering::SeqCst);
                        }
                    }
                    Some(PlayerCommand::Stop) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        ap.store(false, Ordering::SeqCst);
                        az.store(false, Ordering::SeqCst);
                    }
                }

                // A finished track leaves an empty sink behind
                if sink.as_ref().is_some_and(Sink::empty) {
                    sink = None;
                    tracing::info!("Track finished");
                    ap.store(false, Ordering::SeqCst);
                    az.store(false, Ordering::SeqCst);
                }
            }

            if let Some(s) = sink.take() {
                s.stop();
            }
            // Keep stream alive until thread exits
            drop(stream);
        });

        let has_output = ready_rx.recv().unwrap_or(false);

        Self {
            cmd_tx: tx,
            is_playing_flag,
            is_paused_flag,
            has_output,
            sample_buffer,
        }
    }

    /// Stop any existing playback and start playing `path`.
    pub fn play(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(anyhow!("{} is not a file", path.display()));
        }
        self.cmd_tx
            .send(PlayerCommand::Play(path.to_path_buf()))
            .map_err(|_| anyhow!("audio thread has exited"))?;
        Ok(())
    }

    /// Pause playback if currently playing.
    pub fn pause(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Pause);
    }

    /// Resume playback if currently paused.
    pub fn resume(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Resume);
    }

    /// Immediately halt playback (if any).
    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Stop);
    }

    /// Returns true if there's an active sink (i.e. playing or paused).
    pub fn is_playing(&self) -> bool {
        self.is_playing_flag.load(Ordering::SeqCst)
    }

    /// Returns true if playback is currently paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused_flag.load(Ordering::SeqCst)
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioElement for MusicPlayer {
    fn tap(&self) -> Option<SampleBuffer> {
        self.has_output.then(|| self.sample_buffer.clone())
    }
}

/// Decode `path` and queue it on a fresh sink behind a sample tap.
fn open_track(path: &Path, handle: &rodio::OutputStreamHandle, tap: &SampleBuffer) -> Result<Sink> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file)).context("decoding audio")?;
    let sink = Sink::try_new(handle).context("creating sink")?;

    let capturing = SampleCapture::new(source.convert_samples::<f32>(), tap.clone());
    sink.append(capturing);
    sink.play();
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::capture::Capture;
    use crate::config::AnalysisConfig;
    use crate::error::CaptureError;

    /// A player without an audio thread; commands go nowhere.
    fn detached_player(has_output: bool) -> MusicPlayer {
        MusicPlayer {
            cmd_tx: mpsc::channel().0,
            is_playing_flag: Arc::default(),
            is_paused_flag: Arc::default(),
            has_output,
            sample_buffer: new_sample_buffer(),
        }
    }

    #[test]
    fn no_output_device_means_no_tap() {
        let player = detached_player(false);
        assert!(player.tap().is_none());

        let result = Capture::create(&player, AnalysisConfig::default());
        assert!(matches!(result, Err(CaptureError::UnsupportedPlatform)));
    }

    #[test]
    fn output_device_exposes_shared_tap() {
        let player = detached_player(true);
        let tap = player.tap().unwrap();
        assert!(Arc::ptr_eq(&tap, &player.sample_buffer));
        assert!(Capture::create(&player, AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn playing_a_missing_file_fails_early() {
        let mut player = detached_player(true);
        let missing = std::env::temp_dir().join("chirpviz-no-such-track.mp3");
        assert!(player.play(&missing).is_err());
        assert!(!player.is_playing());
    }
}
