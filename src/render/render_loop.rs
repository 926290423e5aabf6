// src/render/render_loop.rs
//! Per-frame sampling and redraw driven by a frame scheduler.

use std::time::Instant;

use super::scheduler::{FrameHandle, FrameScheduler, IntervalScheduler};
use super::sink::RenderSink;
use crate::audio::Capture;
use crate::error::SinkError;

type ErrorHandler = Box<dyn FnMut(&SinkError)>;

enum LoopState<S> {
    Stopped,
    Running {
        capture: Capture,
        sink: S,
        pending: Option<FrameHandle>,
    },
}

/// Pulls a frame from a [`Capture`] and pushes it into a [`RenderSink`] on
/// every scheduled frame.
///
/// The host drives the loop by calling [`poll`](Self::poll); each frame
/// requests its successor before doing any work, so a failing sink never
/// stalls later frames.
pub struct RenderLoop<S: RenderSink> {
    scheduler: Box<dyn FrameScheduler>,
    on_error: ErrorHandler,
    state: LoopState<S>,
    frames: u64,
}

impl<S: RenderSink> RenderLoop<S> {
    /// Use the host's per-frame scheduler, or a 60 Hz timer when it has none.
    pub fn new(native: Option<Box<dyn FrameScheduler>>) -> Self {
        let scheduler = native.unwrap_or_else(|| {
            tracing::debug!("No display refresh callback, falling back to a fixed 60 Hz timer");
            Box::new(IntervalScheduler::default())
        });

        Self {
            scheduler,
            on_error: Box::new(|e| tracing::warn!("Render sink error: {}", e)),
            state: LoopState::Stopped,
            frames: 0,
        }
    }

    /// Replace the handler that receives sink errors.
    pub fn on_error(&mut self, handler: impl FnMut(&SinkError) + 'static) {
        self.on_error = Box::new(handler);
    }

    /// Start rendering now. See [`start_at`](Self::start_at).
    pub fn start(&mut self, capture: Capture, sink: S) -> bool {
        self.start_at(Instant::now(), capture, sink)
    }

    /// Start rendering, requesting the first frame after `now`.
    ///
    /// Returns `false` without scheduling anything when already running; the
    /// passed capture and sink are dropped in that case.
    pub fn start_at(&mut self, now: Instant, capture: Capture, sink: S) -> bool {
        if self.is_running() {
            tracing::warn!("Render loop already running, ignoring start");
            return false;
        }

        let pending = Some(self.scheduler.request_frame(now));
        self.state = LoopState::Running {
            capture,
            sink,
            pending,
        };
        tracing::debug!("Render loop started");
        true
    }

    /// Cancel the pending frame and hand back the capture and sink.
    ///
    /// Does nothing when already stopped.
    pub fn stop(&mut self) -> Option<(Capture, S)> {
        match std::mem::replace(&mut self.state, LoopState::Stopped) {
            LoopState::Running {
                capture,
                sink,
                pending,
            } => {
                if let Some(handle) = pending {
                    self.scheduler.cancel_frame(handle);
                }
                tracing::debug!("Render loop stopped after {} frames", self.frames);
                Some((capture, sink))
            }
            LoopState::Stopped => None,
        }
    }

    /// Run the frame callback if a frame is due at `now`. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let LoopState::Running {
            capture,
            sink,
            pending,
        } = &mut self.state
        else {
            return false;
        };

        let Some(fired) = self.scheduler.take_due(now) else {
            return false;
        };
        if Some(fired) != *pending {
            return false;
        }

        *pending = Some(self.scheduler.request_frame(now));
        self.frames += 1;

        let frame = capture.sample();
        if let Err(e) = sink.update(frame) {
            (self.on_error)(&e);
            return true;
        }
        if let Err(e) = sink.redraw() {
            (self.on_error)(&e);
        }
        true
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// When the next frame is due, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_running() {
            self.scheduler.next_deadline()
        } else {
            None
        }
    }

    /// Frame callbacks run since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The sink currently being driven.
    pub fn sink(&self) -> Option<&S> {
        match &self.state {
            LoopState::Running { sink, .. } => Some(sink),
            LoopState::Stopped => None,
        }
    }

    pub fn sink_mut(&mut self) -> Option<&mut S> {
        match &mut self.state {
            LoopState::Running { sink, .. } => Some(sink),
            LoopState::Stopped => None,
        }
    }
}
