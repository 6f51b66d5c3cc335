use std::time::Duration;

use crate::clock::AnimationClock;
use crate::config::{MorphConfig, MorphMode};
use crate::core::{CellPos, PixelBuffer, Rgba8};
use crate::correspond::Correspondence;
use crate::ease::out_cubic;
use crate::error::{PixmorphError, PixmorphResult};
use crate::modes::{Crossfade, Reveal};
use crate::particle::{ParticleSet, TimingPlan};
use crate::rng::Rng64;

/// Lifecycle of one animation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No animation in flight; the frame shows the source image.
    Idle,
    Running,
    Paused,
    /// Every particle settled (or the mode finished); the frame is final.
    Completed,
}

/// What one frame advance did, and whether the host should schedule another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub phase: Phase,
    /// Whether this call rewrote the frame buffer.
    pub dirty: bool,
    /// Overall completion in `[0, 1]`: settled fraction for particles,
    /// replaced fraction for reveal, blend position for crossfade.
    pub progress: f64,
}

impl StepReport {
    pub fn should_continue(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }
}

#[derive(Debug)]
enum ModeRunner {
    Particles {
        particles: ParticleSet,
        clock: AnimationClock,
    },
    Reveal(Reveal),
    Crossfade(Crossfade),
}

/// One animation run over a fixed pair of buffers.
///
/// The session owns every piece of mutable animation state: the working
/// frame, the mode runner, the clock, and the phase. Hosts drive it
/// cooperatively, calling [`advance`](Self::advance) once per display refresh
/// for as long as [`StepReport::should_continue`] says so. `advance` takes
/// `&mut self`, so at most one frame evaluation can ever be in flight, and
/// restarting or resetting through the same `&mut` borrow cannot race a
/// pending frame.
///
/// All timestamps come from the caller's monotonic clock as [`Duration`]s,
/// which keeps a session fully replayable: same buffers, same seed, same
/// timestamps, same frames.
#[derive(Debug)]
pub struct MorphSession {
    config: MorphConfig,
    seed: u64,
    source: PixelBuffer,
    target: PixelBuffer,
    current: PixelBuffer,
    phase: Phase,
    runner: Option<ModeRunner>,
    last_progress: f64,
}

impl MorphSession {
    /// Creates an idle session. Both buffers must match the configured grid.
    pub fn new(
        config: MorphConfig,
        source: PixelBuffer,
        target: PixelBuffer,
        seed: u64,
    ) -> PixmorphResult<Self> {
        let side = config.grid.get();
        if source.grid() != config.grid || target.grid() != config.grid {
            return Err(PixmorphError::validation(format!(
                "session expects two {side}x{side} buffers, got {}x{} and {}x{}",
                source.side(),
                source.side(),
                target.side(),
                target.side()
            )));
        }
        let current = source.clone();
        Ok(Self {
            config,
            seed,
            source,
            target,
            current,
            phase: Phase::Idle,
            runner: None,
            last_progress: 0.0,
        })
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The frame as of the last advance (or the source image when idle).
    pub fn frame(&self) -> &PixelBuffer {
        &self.current
    }

    /// Starts (or restarts) the animation at `now`.
    ///
    /// Any in-flight run is discarded: the mode runner is rebuilt from the
    /// session seed and the frame rewinds to the source image. Particle mode
    /// builds its correspondence and swarm here, so a start is the only
    /// non-trivial transition.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now: Duration) -> PixmorphResult<()> {
        self.runner = Some(match self.config.mode {
            MorphMode::Particles => {
                let correspondence = Correspondence::between(&self.source, &self.target)?;
                let plan = TimingPlan::from_speed(self.config.speed);
                let mut rng = Rng64::new(self.seed);
                let particles = ParticleSet::build(&self.source, &correspondence, &plan, &mut rng)?;
                ModeRunner::Particles {
                    particles,
                    clock: AnimationClock::started_at(now),
                }
            }
            MorphMode::Reveal => {
                let mut rng = Rng64::new(self.seed);
                ModeRunner::Reveal(Reveal::new(self.config.grid, self.config.speed, &mut rng))
            }
            MorphMode::Crossfade => ModeRunner::Crossfade(Crossfade::new(self.config.speed)),
        });
        self.current.copy_from(&self.source)?;
        self.last_progress = 0.0;
        self.phase = Phase::Running;
        tracing::debug!(mode = ?self.config.mode, seed = self.seed, "animation started");
        Ok(())
    }

    /// Freezes the run. Only meaningful while running; otherwise a no-op.
    pub fn pause(&mut self, now: Duration) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(ModeRunner::Particles { clock, .. }) = self.runner.as_mut() {
            clock.pause(now);
        }
        self.phase = Phase::Paused;
        tracing::debug!("animation paused");
    }

    /// Continues a paused run from exactly where it stopped.
    pub fn resume(&mut self, now: Duration) {
        if self.phase != Phase::Paused {
            return;
        }
        if let Some(ModeRunner::Particles { clock, .. }) = self.runner.as_mut() {
            clock.resume(now);
        }
        self.phase = Phase::Running;
        tracing::debug!("animation resumed");
    }

    /// Discards the run from any phase and rewinds the frame to the source.
    pub fn reset(&mut self) {
        self.runner = None;
        self.current = self.source.clone();
        self.last_progress = 0.0;
        self.phase = Phase::Idle;
        tracing::debug!("animation reset");
    }

    /// Advances one frame at `now` and reports whether more work remains.
    ///
    /// Outside [`Phase::Running`] this leaves the frame untouched and
    /// reports the phase back, so a host that keeps scheduling refreshes
    /// while paused simply gets clean no-ops.
    #[tracing::instrument(skip(self))]
    pub fn advance(&mut self, now: Duration) -> StepReport {
        if self.phase != Phase::Running {
            return StepReport {
                phase: self.phase,
                dirty: false,
                progress: self.last_progress,
            };
        }
        let Some(runner) = self.runner.as_mut() else {
            // A running session always owns a runner.
            self.phase = Phase::Idle;
            return StepReport {
                phase: self.phase,
                dirty: false,
                progress: self.last_progress,
            };
        };

        let (done, progress) = match runner {
            ModeRunner::Particles { particles, clock } => {
                let elapsed = clock.elapsed_secs(now);
                let mut settled = 0usize;
                self.current.fill(Rgba8::TRANSPARENT);
                for p in particles.iter() {
                    let local = p.progress(elapsed);
                    if local >= 1.0 {
                        settled += 1;
                    }
                    let pos = p.pos_at(out_cubic(local));
                    let cell = CellPos {
                        x: pos.x.round() as u32,
                        y: pos.y.round() as u32,
                    };
                    self.current.put(cell, p.color);
                }
                (settled == particles.len(), settled as f64 / particles.len() as f64)
            }
            ModeRunner::Reveal(reveal) => {
                let done = reveal.advance(&self.target, &mut self.current);
                (done, reveal.progress())
            }
            ModeRunner::Crossfade(fade) => {
                let done = fade.advance(&self.source, &self.target, &mut self.current);
                (done, fade.progress())
            }
        };

        self.last_progress = progress;
        if done {
            self.phase = Phase::Completed;
            tracing::debug!("animation completed");
        }
        StepReport {
            phase: self.phase,
            dirty: true,
            progress,
        }
    }
}
