// src/render/scheduler.rs
//! Frame scheduling primitives for the render loop.

use std::time::{Duration, Instant};

/// Tick rate used when the host has no per-frame callback of its own.
pub const FALLBACK_FRAME_RATE: u32 = 60;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// A source of one-shot frame callbacks.
///
/// Only one request is outstanding at a time; requesting again replaces it.
pub trait FrameScheduler {
    /// Arm a callback for the next frame after `now`.
    fn request_frame(&mut self, now: Instant) -> FrameHandle;

    /// Cancel a pending request. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Take the pending request if it is due at `now`.
    fn take_due(&mut self, now: Instant) -> Option<FrameHandle>;

    /// When the pending request becomes due, if any.
    fn next_deadline(&self) -> Option<Instant>;
}

/// Fixed-interval timer standing in for a display refresh callback.
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl IntervalScheduler {
    /// Fire every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_id: 0,
            pending: None,
        }
    }

    /// Fire `rate` times per second.
    pub fn with_rate(rate: u32) -> Self {
        Self::new(Duration::from_secs(1) / rate.max(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::with_rate(FALLBACK_FRAME_RATE)
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self, now: Instant) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some((handle, now + self.period));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.is_some_and(|(pending, _)| pending == handle) {
            self.pending = None;
        }
    }

    fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_runs_at_sixty_hz() {
        let scheduler = IntervalScheduler::default();
        assert_eq!(scheduler.period(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn fires_once_deadline_passes() {
        let mut scheduler = IntervalScheduler::new(Duration::from_millis(10));
        let t0 = Instant::now();
        let handle = scheduler.request_frame(t0);

        assert_eq!(scheduler.take_due(t0 + Duration::from_millis(5)), None);
        assert_eq!(scheduler.take_due(t0 + Duration::from_millis(10)), Some(handle));
        assert_eq!(scheduler.take_due(t0 + Duration::from_millis(20)), None);
    }

    #[test]
    fn cancel_ignores_stale_handles() {
        let mut scheduler = IntervalScheduler::new(Duration::from_millis(10));
        let t0 = Instant::now();
        let stale = scheduler.request_frame(t0);
        let fresh = scheduler.request_frame(t0);

        scheduler.cancel_frame(stale);
        assert_eq!(scheduler.take_due(t0 + Duration::from_secs(1)), Some(fresh));

        scheduler.cancel_frame(fresh);
        assert_eq!(scheduler.next_deadline(), None);
    }
}
