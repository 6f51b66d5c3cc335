use std::time::Duration;

/// Pause-aware animation clock over caller-supplied monotonic timestamps.
///
/// The clock never reads wall time itself; every call takes `now` from the
/// caller's own monotonic source, which keeps the whole engine replayable
/// under a synthetic timeline. Pausing freezes elapsed time at the pause
/// edge; resuming shifts the origin forward by the paused interval, so
/// progress continues from exactly where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    origin: Duration,
    paused_at: Option<Duration>,
}

impl AnimationClock {
    pub fn started_at(now: Duration) -> Self {
        Self {
            origin: now,
            paused_at: None,
        }
    }

    /// Freezes elapsed time. A second pause while paused is a no-op.
    pub fn pause(&mut self, now: Duration) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreezes the clock without losing progress. A resume while running
    /// is a no-op.
    pub fn resume(&mut self, now: Duration) {
        if let Some(paused_at) = self.paused_at.take() {
            self.origin += now.saturating_sub(paused_at);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Animation time accumulated so far, excluding paused intervals.
    ///
    /// Saturates to zero if `now` regresses past the origin instead of
    /// panicking.
    pub fn elapsed(&self, now: Duration) -> Duration {
        let edge = self.paused_at.unwrap_or(now);
        edge.saturating_sub(self.origin)
    }

    pub fn elapsed_secs(&self, now: Duration) -> f64 {
        self.elapsed(now).as_secs_f64()
    }
}
